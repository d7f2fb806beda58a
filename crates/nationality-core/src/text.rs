// crates/nationality-core/src/text.rs

/// Normalize a free-text search query: trim surrounding whitespace and
/// lowercase it.
///
/// The result is the key of the search cache, so `" United "` and `"united"`
/// share one entry.
///
/// ```rust
/// use nationality_core::text::normalize_query;
///
/// assert_eq!(normalize_query("  South KOR "), "south kor");
/// assert_eq!(normalize_query(" \t "), "");
/// ```
pub fn normalize_query(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Convert a string into a folded key suitable for loose comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Åland` -> `Aland`)
/// 2\) Normalize to lowercase
///
/// Used for type-ahead ("jump to letter") navigation, where a user typing
/// `a` expects to land on names starting with `Å` as well.
///
/// ```rust
/// use nationality_core::text::fold_key;
///
/// assert_eq!(fold_key("Côte"), "cote");
/// assert_eq!(fold_key("Łódź"), "lodz");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Returns `true` if the folded form of `name` starts with the folded form
/// of `letter`.
pub fn starts_with_folded(name: &str, letter: char) -> bool {
    let mut buf = [0u8; 4];
    let prefix = fold_key(letter.encode_utf8(&mut buf));
    !prefix.is_empty() && fold_key(name).starts_with(&prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_query(" United "), "united");
        assert_eq!(normalize_query("UNITED"), "united");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn starts_with_folded_ignores_accents_and_case() {
        assert!(starts_with_folded("Åland Islands", 'a'));
        assert!(starts_with_folded("Germany", 'G'));
        assert!(!starts_with_folded("Germany", 'h'));
        assert!(!starts_with_folded("", 'a'));
    }
}
