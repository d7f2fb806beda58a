// crates/nationality-core/src/model/country.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Code of the reserved "no nationality specified" entry.
pub const SENTINEL_CODE: &str = "unknown";
/// Display name of the sentinel entry (a user choice).
pub const SENTINEL_NAME: &str = "Prefer not to say";
/// Neutral glyph of the sentinel entry; no real country uses it.
pub const SENTINEL_FLAG: &str = "🏳️";
/// Name reported for codes that are missing or not in the catalog (a data problem).
pub const UNKNOWN_NAME: &str = "Unknown";

/// A selectable nationality.
///
/// Strings are `Cow<'static, str>` so the builtin table is borrowed while
/// catalogs loaded from disk own their data.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub code: Cow<'static, str>,
    pub name: Cow<'static, str>,
    pub flag: Cow<'static, str>,
}

impl Country {
    pub const fn from_static(code: &'static str, name: &'static str, flag: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            name: Cow::Borrowed(name),
            flag: Cow::Borrowed(flag),
        }
    }

    pub fn new(
        code: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        flag: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            flag: flag.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// `true` for the "Prefer not to say" entry.
    pub fn is_sentinel(&self) -> bool {
        self.code == SENTINEL_CODE
    }

    /// The code as seen by consumers of a selection: the sentinel maps to `None`.
    pub fn selection_code(&self) -> Option<&str> {
        if self.is_sentinel() {
            None
        } else {
            Some(self.code())
        }
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_selection_is_none() {
        let sentinel = Country::from_static(SENTINEL_CODE, SENTINEL_NAME, SENTINEL_FLAG);
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.selection_code(), None);

        let korea = Country::new("KR", "South Korea", "🇰🇷");
        assert_eq!(korea.selection_code(), Some("KR"));
    }
}
