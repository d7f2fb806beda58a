// crates/nationality-core/src/common.rs
use crate::error::{NationalityError, Result};
use serde::{Deserialize, Serialize};

/// Number of normalized queries the search cache keeps by default.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Simple aggregate statistics for the database.
///
/// Returned by [`NationalitySearch::stats`](crate::NationalitySearch::stats).
/// `cached_queries` never exceeds `cache_capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub cached_queries: usize,
    pub cache_capacity: usize,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_evictions: u64,
}

/// Construction options for [`NationalityDb`](crate::NationalityDb).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbOptions {
    /// Maximum number of distinct normalized queries kept in the search cache.
    pub cache_capacity: usize,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl DbOptions {
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(NationalityError::InvalidOption(
                "cache_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_one_hundred() {
        assert_eq!(DbOptions::default().cache_capacity, 100);
        assert!(DbOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = DbOptions::default()
            .with_cache_capacity(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, NationalityError::InvalidOption(_)));
    }
}
