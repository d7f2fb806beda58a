// crates/nationality-core/src/breakdown.rs
//! Vote counts grouped by voter nationality, for the results view.

use crate::model::{NationalityDb, SENTINEL_CODE, SENTINEL_FLAG, SENTINEL_NAME, UNKNOWN_NAME};
use crate::traits::NationalitySearch;
use serde::Serialize;
use std::collections::HashMap;

/// One row of a breakdown.
///
/// `code` is the catalog code, [`SENTINEL_CODE`] for voters who preferred
/// not to say, and `None` for the row collecting codes the catalog does not
/// know.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub code: Option<String>,
    pub name: String,
    pub flag: String,
    pub count: u64,
    pub share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NationalityBreakdown {
    pub total: u64,
    pub rows: Vec<BreakdownRow>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum Group {
    Country(String),
    Unspecified,
    Unrecognized,
}

impl NationalityBreakdown {
    /// Aggregates `(code, count)` pairs as they come out of the vote store.
    ///
    /// Codes are compared case-insensitively. Empty codes count as
    /// unspecified.
    pub fn from_counts<'a, I>(db: &NationalityDb, counts: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, u64)>,
    {
        let mut groups: HashMap<Group, u64> = HashMap::new();
        for (code, count) in counts {
            *groups.entry(classify(db, code)).or_default() += count;
        }

        let total: u64 = groups.values().sum();
        let mut rows: Vec<BreakdownRow> = groups
            .into_iter()
            .map(|(group, count)| {
                let share = if total == 0 { 0.0 } else { count as f64 / total as f64 };
                let (code, name, flag) = match group {
                    Group::Country(code) => {
                        let country = db.resolve(Some(&code));
                        (Some(code), country.name().to_owned(), country.flag().to_owned())
                    }
                    Group::Unspecified => (
                        Some(SENTINEL_CODE.to_owned()),
                        SENTINEL_NAME.to_owned(),
                        SENTINEL_FLAG.to_owned(),
                    ),
                    Group::Unrecognized => (None, UNKNOWN_NAME.to_owned(), SENTINEL_FLAG.to_owned()),
                };
                BreakdownRow { code, name, flag, count, share }
            })
            .collect();

        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Self { total, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, code: &str) -> Option<&BreakdownRow> {
        self.rows.iter().find(|r| r.code.as_deref() == Some(code))
    }
}

fn classify(db: &NationalityDb, code: Option<&str>) -> Group {
    let code = match code.map(str::trim) {
        None | Some("") => return Group::Unspecified,
        Some(c) if c.eq_ignore_ascii_case(SENTINEL_CODE) => return Group::Unspecified,
        Some(c) => c.to_uppercase(),
    };
    if db.is_valid(Some(&code)) {
        Group::Country(code)
    } else {
        Group::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_case_variants_and_sorts_by_count() {
        let db = NationalityDb::builtin();
        let b = NationalityBreakdown::from_counts(
            &db,
            [(Some("kr"), 2), (Some("KR"), 3), (Some("SE"), 5), (Some("JP"), 1)],
        );
        assert_eq!(b.total, 11);
        let codes: Vec<Option<&str>> = b.rows.iter().map(|r| r.code.as_deref()).collect();
        // Ties on count fall back to the name.
        assert_eq!(codes, vec![Some("KR"), Some("SE"), Some("JP")]);
        assert_eq!(b.row("KR").map(|r| r.count), Some(5));
        assert_eq!(b.row("KR").map(|r| r.name.as_str()), Some("South Korea"));
    }

    #[test]
    fn sentinel_and_missing_share_one_row() {
        let db = NationalityDb::builtin();
        let b = NationalityBreakdown::from_counts(
            &db,
            [(None, 1), (Some("unknown"), 2), (Some(""), 1), (Some("US"), 1)],
        );
        let row = b.row(SENTINEL_CODE).unwrap();
        assert_eq!(row.count, 4);
        assert_eq!(row.name, SENTINEL_NAME);
        assert_eq!(b.rows.len(), 2);
    }

    #[test]
    fn unrecognized_codes_are_grouped_as_unknown() {
        let db = NationalityDb::builtin();
        let b = NationalityBreakdown::from_counts(&db, [(Some("ZZ"), 1), (Some("XX"), 3)]);
        assert_eq!(b.rows.len(), 1);
        let row = &b.rows[0];
        assert_eq!(row.code, None);
        assert_eq!(row.name, "Unknown");
        assert_eq!(row.flag, SENTINEL_FLAG);
        assert_eq!(row.share, 1.0);
    }

    #[test]
    fn zero_total_has_zero_shares() {
        let db = NationalityDb::builtin();
        let b = NationalityBreakdown::from_counts(&db, [(Some("SE"), 0)]);
        assert_eq!(b.total, 0);
        assert_eq!(b.rows[0].share, 0.0);

        assert!(NationalityBreakdown::from_counts(&db, std::iter::empty::<(Option<&str>, u64)>()).is_empty());
    }
}
