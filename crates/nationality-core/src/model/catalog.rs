// crates/nationality-core/src/model/catalog.rs
use super::country::{Country, SENTINEL_CODE};
use super::data::BUILTIN_COUNTRIES;
use crate::error::{NationalityError, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    countries: BUILTIN_COUNTRIES
        .iter()
        .map(|&(code, name, flag)| Country::from_static(code, name, flag))
        .collect(),
});

/// The ordered, immutable list of selectable nationalities.
///
/// Invariants (checked by [`Catalog::from_countries`]):
/// - exactly one entry has the sentinel code and it sits at index 0,
/// - all other entries are sorted by name,
/// - codes and names are unique, and no field is empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    /// The compiled-in catalog. Built on first use, lives for the process.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Validate and wrap a custom list of countries.
    pub fn from_countries(countries: Vec<Country>) -> Result<Self> {
        validate(&countries)?;
        if countries.len() > usize::from(u16::MAX) {
            return Err(NationalityError::InvalidCatalog(format!(
                "catalog holds {} entries, at most {} are supported",
                countries.len(),
                u16::MAX
            )));
        }
        Ok(Self { countries })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// The "Prefer not to say" entry.
    pub fn sentinel(&self) -> &Country {
        // Every constructor guarantees the sentinel at index 0.
        &self.countries[0]
    }

    pub fn get(&self, id: u16) -> Option<&Country> {
        self.countries.get(usize::from(id))
    }
}

fn validate(countries: &[Country]) -> Result<()> {
    let invalid = |msg: String| Err(NationalityError::InvalidCatalog(msg));

    match countries.first() {
        None => return invalid("catalog is empty".into()),
        Some(first) if !first.is_sentinel() => {
            return invalid(format!(
                "first entry must be '{SENTINEL_CODE}', found '{}'",
                first.code()
            ))
        }
        Some(_) => {}
    }

    let mut codes = HashSet::with_capacity(countries.len());
    let mut names = HashSet::with_capacity(countries.len());
    for (i, c) in countries.iter().enumerate() {
        if c.code().is_empty() || c.name().is_empty() || c.flag().is_empty() {
            return invalid(format!("entry {i} has an empty field"));
        }
        if i > 0 && c.is_sentinel() {
            return invalid(format!("sentinel code repeated at index {i}"));
        }
        if !codes.insert(c.code()) {
            return invalid(format!("duplicate code '{}'", c.code()));
        }
        if !names.insert(c.name()) {
            return invalid(format!("duplicate name '{}'", c.name()));
        }
    }

    if let Some(w) = countries[1..].windows(2).find(|w| w[0].name > w[1].name) {
        return invalid(format!(
            "entries not sorted by name: '{}' before '{}'",
            w[0].name(),
            w[1].name()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::country::{SENTINEL_FLAG, SENTINEL_NAME};

    fn sentinel() -> Country {
        Country::from_static(SENTINEL_CODE, SENTINEL_NAME, SENTINEL_FLAG)
    }

    #[test]
    fn builtin_satisfies_invariants() {
        let catalog = Catalog::builtin();
        assert!(validate(catalog.countries()).is_ok());
        assert_eq!(catalog.sentinel().code(), SENTINEL_CODE);
        assert_eq!(catalog.sentinel().name(), SENTINEL_NAME);
        assert!(catalog.len() > 190);
    }

    #[test]
    fn builtin_has_exactly_one_sentinel_first() {
        let catalog = Catalog::builtin();
        let positions: Vec<usize> = catalog
            .countries()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.code() == SENTINEL_CODE)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![0]);
    }

    #[test]
    fn sentinel_flag_is_not_a_country_flag() {
        let catalog = Catalog::builtin();
        assert!(catalog.countries()[1..]
            .iter()
            .all(|c| c.flag() != catalog.sentinel().flag()));
    }

    #[test]
    fn builtin_codes_are_uppercase_alpha2() {
        for c in &Catalog::builtin().countries()[1..] {
            assert_eq!(c.code().len(), 2, "{}", c.code());
            assert!(c.code().chars().all(|ch| ch.is_ascii_uppercase()));
        }
    }

    #[test]
    fn rejects_missing_sentinel() {
        let err = Catalog::from_countries(vec![Country::new("DE", "Germany", "🇩🇪")]).unwrap_err();
        assert!(matches!(err, NationalityError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_unsorted_names() {
        let err = Catalog::from_countries(vec![
            sentinel(),
            Country::new("FR", "France", "🇫🇷"),
            Country::new("DE", "Germany", "🇩🇪"),
            Country::new("AT", "Austria", "🇦🇹"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("not sorted"));
    }

    #[test]
    fn rejects_duplicate_codes_and_empty_flags() {
        let dup = Catalog::from_countries(vec![
            sentinel(),
            Country::new("DE", "Germany", "🇩🇪"),
            Country::new("DE", "Germany (again)", "🇩🇪"),
        ]);
        assert!(dup.is_err());

        let empty_flag =
            Catalog::from_countries(vec![sentinel(), Country::new("DE", "Germany", "")]);
        assert!(empty_flag.is_err());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(Catalog::from_countries(Vec::new()).is_err());
    }

    #[test]
    fn accepts_minimal_catalog() {
        let catalog = Catalog::from_countries(vec![
            sentinel(),
            Country::new("KR", "South Korea", "🇰🇷"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).map(Country::code), Some("KR"));
        assert!(catalog.get(2).is_none());
    }
}
