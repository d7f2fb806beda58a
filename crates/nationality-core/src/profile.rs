// crates/nationality-core/src/profile.rs
//! What the session layer knows about the signed-in user's nationality.
//!
//! Fetching the profile is not this crate's job. Hosts translate whatever
//! their session bootstrap reports into a [`ProfileSnapshot`] and hand it to
//! [`NationalitySelector::apply_profile`](crate::selector::NationalitySelector::apply_profile).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ProfileSnapshot {
    /// Request in flight; nothing to show yet.
    #[default]
    Loading,
    /// Profile loaded. `None` means the user never set a nationality.
    Ready(Option<String>),
    /// The profile could not be read.
    Failed(String),
}

impl ProfileSnapshot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The stored nationality, if the profile is loaded and has one.
    pub fn nationality(&self) -> Option<&str> {
        match self {
            Self::Ready(code) => code.as_deref(),
            _ => None,
        }
    }
}

/// Source of profile snapshots (session store, cached bootstrap payload...).
pub trait ProfileReader {
    fn snapshot(&self) -> ProfileSnapshot;
}

impl<F> ProfileReader for F
where
    F: Fn() -> ProfileSnapshot,
{
    fn snapshot(&self) -> ProfileSnapshot {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ready_snapshots_carry_a_nationality() {
        assert_eq!(ProfileSnapshot::Loading.nationality(), None);
        assert_eq!(ProfileSnapshot::Failed("timeout".into()).nationality(), None);
        assert_eq!(ProfileSnapshot::Ready(None).nationality(), None);
        assert_eq!(ProfileSnapshot::Ready(Some("KR".into())).nationality(), Some("KR"));
    }

    #[test]
    fn closures_are_readers() {
        let reader = || ProfileSnapshot::Ready(Some("SE".into()));
        assert!(reader.snapshot().is_ready());
    }

    #[test]
    fn serializes_with_state_tag() {
        let json = serde_json::to_string(&ProfileSnapshot::Ready(Some("KR".into()))).unwrap();
        assert_eq!(json, r#"{"state":"ready","value":"KR"}"#);
    }
}
