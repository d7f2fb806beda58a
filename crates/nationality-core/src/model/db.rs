// crates/nationality-core/src/model/db.rs
use super::catalog::Catalog;
use crate::common::DbOptions;
use crate::error::Result;
use crate::index::LookupIndex;
use crate::search::SearchCache;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The composition root of the picker: a catalog plus the structures derived
/// from it.
///
/// Build one per application and share it (`Arc<NationalityDb>`) between
/// every picker instance. The index is read-only; the search cache only
/// ever appends or evicts, so sharing needs no coordination beyond the
/// internal lock.
#[derive(Debug)]
pub struct NationalityDb {
    pub(crate) catalog: Catalog,
    pub(crate) index: LookupIndex,
    pub(crate) cache: Mutex<SearchCache>,
}

impl NationalityDb {
    /// Database over the builtin catalog with default options.
    pub fn builtin() -> Self {
        Self::assemble(Catalog::builtin().clone(), DbOptions::default())
    }

    /// Database over the builtin catalog with custom options.
    pub fn with_options(options: DbOptions) -> Result<Self> {
        Self::new(Catalog::builtin().clone(), options)
    }

    /// Database over any validated catalog.
    pub fn new(catalog: Catalog, options: DbOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::assemble(catalog, options))
    }

    fn assemble(catalog: Catalog, options: DbOptions) -> Self {
        let index = LookupIndex::build(&catalog);
        tracing::debug!(
            countries = catalog.len(),
            cache_capacity = options.cache_capacity,
            "nationality db assembled"
        );
        Self {
            catalog,
            index,
            cache: Mutex::new(SearchCache::new(options.cache_capacity)),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// `true` if `query` (after normalization) currently has a cache entry.
    pub fn is_cached(&self, query: &str) -> bool {
        self.cache().contains(&crate::text::normalize_query(query))
    }

    /// A panic while holding the lock cannot leave the cache inconsistent
    /// (inserts and evictions are single map operations), so poisoning is
    /// ignored.
    pub(crate) fn cache(&self) -> MutexGuard<'_, SearchCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for NationalityDb {
    fn default() -> Self {
        Self::builtin()
    }
}
