//! Umbrella crate for the nationality workspace.
//!
//! Re-exports [`nationality_core`] so the demos can `use nationality_rs::prelude::*`.

pub use nationality_core::*;
