// crates/nationality-core/src/prelude.rs
//! nationality-core prelude: bring common types and traits into scope.

#![allow(unused_imports)]

pub use crate::breakdown::{BreakdownRow, NationalityBreakdown};
pub use crate::common::{DbOptions, DbStats, DEFAULT_CACHE_CAPACITY};
pub use crate::error::{NationalityError, Result};
pub use crate::model::{
    Catalog, Country, NationalityDb, SENTINEL_CODE, SENTINEL_FLAG, SENTINEL_NAME, UNKNOWN_NAME,
};
pub use crate::profile::{ProfileReader, ProfileSnapshot};
pub use crate::selector::{
    Deferred, Immediate, NationalitySelector, PersistStrategy, SelectorKey, SelectorOutcome,
    SelectorState,
};
pub use crate::text::{fold_key, normalize_query};
pub use crate::traits::{NameMatch, NationalitySearch};
pub use crate::update::{mutation_fn, NationalityMutation, SubmitOutcome, UpdateFlow, UpdateStatus};
