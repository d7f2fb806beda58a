// crates/nationality-core/src/traits.rs
use crate::common::DbStats;
use crate::model::Country;

/// Name-based matching helpers for types that expose a canonical display name.
///
/// # Examples
/// ```rust
/// use nationality_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Åland").name_starts_with('a'));
/// assert!(!Place("South Korea").name_starts_with('k'));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive first-letter test used by type-ahead navigation.
    #[inline]
    fn name_starts_with(&self, letter: char) -> bool {
        crate::text::starts_with_folded(self.name_str(), letter)
    }
}

/// Read-only queries over a nationality catalog.
///
/// Every method is total: missing or unmatched input degrades to a
/// documented default instead of an error.
pub trait NationalitySearch {
    fn stats(&self) -> DbStats;

    /// All countries in canonical order (sentinel first).
    fn countries(&self) -> &[Country];

    /// Exact-case lookup; returns the sentinel country when `code` is
    /// missing or unmatched.
    ///
    /// ```rust
    /// use nationality_core::{NationalityDb, NationalitySearch};
    ///
    /// let db = NationalityDb::builtin();
    /// assert_eq!(db.resolve(Some("US")).name(), "United States");
    /// assert!(db.resolve(Some("us")).is_sentinel());
    /// assert!(db.resolve(None).is_sentinel());
    /// ```
    fn resolve(&self, code: Option<&str>) -> &Country;

    /// `true` only for an exact-case match (the sentinel code included).
    fn is_valid(&self, code: Option<&str>) -> bool;

    /// Filter countries by a free-text query against their names.
    ///
    /// Missing, empty or whitespace-only queries return the whole catalog.
    /// Otherwise the query is trimmed and lowercased and every country whose
    /// name contains it (case-insensitively) is returned in catalog order.
    /// Results are memoized per normalized query.
    fn search(&self, query: Option<&str>) -> Vec<&Country>;

    /// Flag glyph for `code`, matched case-insensitively; the sentinel glyph
    /// when nothing matches.
    ///
    /// ```rust
    /// use nationality_core::{NationalityDb, NationalitySearch};
    ///
    /// let db = NationalityDb::builtin();
    /// assert_eq!(db.flag_for(Some("us")), "🇺🇸");
    /// assert_eq!(db.flag_for(Some("ZZ")), db.flag_for(None));
    /// ```
    fn flag_for(&self, code: Option<&str>) -> &str;

    /// Display name for `code` (exact case). Returns `"Unknown"` when the code
    /// is missing or unmatched, which is different from the sentinel's own
    /// name, `"Prefer not to say"`.
    ///
    /// ```rust
    /// use nationality_core::{NationalityDb, NationalitySearch};
    ///
    /// let db = NationalityDb::builtin();
    /// assert_eq!(db.name_for(Some("unknown")), "Prefer not to say");
    /// assert_eq!(db.name_for(Some("ZZ")), "Unknown");
    /// assert_eq!(db.name_for(None), "Unknown");
    /// ```
    fn name_for(&self, code: Option<&str>) -> &str;
}
