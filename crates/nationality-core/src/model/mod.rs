// crates/nationality-core/src/model/mod.rs
pub mod catalog;
pub mod country;
mod data;
pub mod db;

pub use catalog::Catalog;
pub use country::{Country, SENTINEL_CODE, SENTINEL_FLAG, SENTINEL_NAME, UNKNOWN_NAME};
pub use db::NationalityDb;
