// crates/nationality-core/src/lib.rs

//! # nationality-core
//!
//! Country catalog, cached name search and a headless nationality picker.
//!
//! The crate is split along the data flow of the picker:
//!
//! - [`model`] holds the immutable [`Catalog`] of [`Country`] values and the
//!   [`NationalityDb`] composition root that owns the lookup index and the
//!   search cache.
//! - [`search`] implements [`NationalitySearch`] (exact-case resolve,
//!   case-insensitive flag lookup, cached substring search).
//! - [`selector`] is the dropdown state machine; it never renders anything.
//! - [`update`] persists a committed nationality through an external
//!   [`NationalityMutation`] with at most one request in flight.
//!
//! ```rust
//! use nationality_core::prelude::*;
//!
//! let db = NationalityDb::builtin();
//! assert_eq!(db.resolve(Some("KR")).name(), "South Korea");
//! assert_eq!(db.flag_for(Some("kr")), db.flag_for(Some("KR")));
//! assert_eq!(db.name_for(Some("ZZ")), "Unknown");
//! assert!(db.search(Some(" kor ")).iter().any(|c| c.code() == "KR"));
//! ```

pub mod breakdown;
pub mod common;
pub mod error;
pub mod index;
#[cfg(feature = "json")]
pub mod loader;
pub mod model;
pub mod prelude;
pub mod profile;
pub mod search;
pub mod selector;
pub mod text;
pub mod traits;
pub mod update;

// Re-exports
pub use crate::common::{DbOptions, DbStats};
pub use crate::error::{NationalityError, Result};
pub use crate::model::{Catalog, Country, NationalityDb, SENTINEL_CODE};
pub use crate::selector::{NationalitySelector, SelectorKey, SelectorOutcome};
pub use crate::traits::{NameMatch, NationalitySearch};
pub use crate::update::{NationalityMutation, SubmitOutcome, UpdateFlow};
