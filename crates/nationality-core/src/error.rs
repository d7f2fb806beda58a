// crates/nationality-core/src/error.rs
use thiserror::Error;

/// Errors raised while building or loading a nationality database.
///
/// Lookups and searches never fail; only construction (custom catalogs,
/// options) and file loading can.
#[derive(Debug, Error)]
pub enum NationalityError {
    #[error("Catalog not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

pub type Result<T, E = NationalityError> = std::result::Result<T, E>;
