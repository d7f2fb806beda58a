// crates/nationality-core/src/index.rs
//! O(1) code lookups derived from a [`Catalog`].
//!
//! Keys are stored exactly as they appear in the catalog; no case folding
//! happens here. Callers that accept codes in any case normalize first
//! (see [`NationalitySearch::flag_for`](crate::NationalitySearch::flag_for)).

use crate::model::Catalog;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Lookup structures built once per catalog.
#[derive(Debug, Clone)]
pub struct LookupIndex {
    by_code: HashMap<String, u16>,
    codes: HashSet<String>,
    lower_names: Vec<String>,
    all: Arc<[u16]>,
}

impl LookupIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let countries = catalog.countries();
        let mut by_code = HashMap::with_capacity(countries.len());
        let mut codes = HashSet::with_capacity(countries.len());
        let mut lower_names = Vec::with_capacity(countries.len());

        for (id, c) in countries.iter().enumerate() {
            // Catalog construction caps the length at u16::MAX.
            let id = id as u16;
            by_code.insert(c.code().to_owned(), id);
            codes.insert(c.code().to_owned());
            lower_names.push(c.name().to_lowercase());
        }

        let all = (0..countries.len() as u16).collect();

        Self {
            by_code,
            codes,
            lower_names,
            all,
        }
    }

    /// Catalog position of `code` (exact case).
    pub fn position(&self, code: &str) -> Option<u16> {
        self.by_code.get(code).copied()
    }

    /// Exact-case membership test.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Every catalog position, in canonical order.
    pub fn all(&self) -> Arc<[u16]> {
        Arc::clone(&self.all)
    }

    /// Linear scan: positions whose lower-cased name contains `needle`.
    ///
    /// `needle` must already be normalized.
    pub fn scan<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = u16> + 'a {
        self.lower_names
            .iter()
            .enumerate()
            .filter(move |(_, name)| name.contains(needle))
            .map(|(id, _)| id as u16)
    }

    pub fn len(&self) -> usize {
        self.lower_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact_case() {
        let index = LookupIndex::build(Catalog::builtin());
        assert!(index.contains("US"));
        assert!(!index.contains("us"));
        assert!(index.contains("unknown"));
        assert!(!index.contains("UNKNOWN"));
        assert_eq!(index.position("unknown"), Some(0));
        assert!(index.position("Us").is_none());
    }

    #[test]
    fn scan_preserves_catalog_order() {
        let catalog = Catalog::builtin();
        let index = LookupIndex::build(catalog);
        let names: Vec<&str> = index
            .scan("korea")
            .filter_map(|id| catalog.get(id))
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["North Korea", "South Korea"]);
    }

    #[test]
    fn all_covers_catalog() {
        let index = LookupIndex::build(Catalog::builtin());
        assert_eq!(index.all().len(), Catalog::builtin().len());
        assert_eq!(index.len(), Catalog::builtin().len());
        assert_eq!(index.all()[0], 0);
    }
}
