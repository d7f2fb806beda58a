// crates/nationality-core/src/search.rs
use crate::common::DbStats;
use crate::model::{Country, NationalityDb, UNKNOWN_NAME};
use crate::text::normalize_query;
use crate::traits::NationalitySearch;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tracing::debug;

/// Bounded memo of search results keyed by normalized query.
///
/// Eviction is FIFO: when full, the oldest *inserted* key goes first,
/// regardless of how recently it was read. Values are catalog positions and
/// are never overwritten once inserted.
#[derive(Debug)]
pub struct SearchCache {
    capacity: usize,
    entries: HashMap<String, Arc<[u16]>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl SearchCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Looks up `key`, counting the hit or miss.
    pub fn get(&mut self, key: &str) -> Option<Arc<[u16]>> {
        match self.entries.get(key) {
            Some(ids) => {
                self.hits += 1;
                Some(Arc::clone(ids))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts a new key, evicting the oldest entry first when full.
    /// An existing key keeps its original value.
    pub fn insert(&mut self, key: String, ids: Arc<[u16]>) {
        if self.capacity == 0 || self.entries.contains_key(&key) {
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.evictions += 1;
            debug!(query = %oldest, "search cache eviction");
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, ids);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl NationalityDb {
    /// Catalog positions matching `query`; the shared "everything" list for
    /// blank queries. Used by the selector to avoid re-borrowing countries.
    pub fn search_positions(&self, query: Option<&str>) -> Arc<[u16]> {
        let normalized = query.map(normalize_query).unwrap_or_default();
        if normalized.is_empty() {
            return self.index.all();
        }

        let mut cache = self.cache();
        if let Some(ids) = cache.get(&normalized) {
            return ids;
        }

        let ids: Arc<[u16]> = self.index.scan(&normalized).collect();
        debug!(query = %normalized, matches = ids.len(), "search cache insert");
        cache.insert(normalized, Arc::clone(&ids));
        ids
    }

    /// Country at a catalog position, falling back to the sentinel.
    pub fn country_at(&self, id: u16) -> &Country {
        self.catalog.get(id).unwrap_or_else(|| self.catalog.sentinel())
    }

    fn lookup(&self, code: &str) -> Option<&Country> {
        self.index.position(code).and_then(|id| self.catalog.get(id))
    }
}

impl NationalitySearch for NationalityDb {
    fn stats(&self) -> DbStats {
        let cache = self.cache();
        DbStats {
            countries: self.catalog.len(),
            cached_queries: cache.len(),
            cache_capacity: cache.capacity(),
            cache_hits: cache.hits,
            cache_misses: cache.misses,
            cache_evictions: cache.evictions,
        }
    }

    fn countries(&self) -> &[Country] {
        self.catalog.countries()
    }

    fn resolve(&self, code: Option<&str>) -> &Country {
        code.and_then(|c| self.lookup(c))
            .unwrap_or_else(|| self.catalog.sentinel())
    }

    fn is_valid(&self, code: Option<&str>) -> bool {
        code.is_some_and(|c| self.index.contains(c))
    }

    fn search(&self, query: Option<&str>) -> Vec<&Country> {
        self.search_positions(query)
            .iter()
            .map(|&id| self.country_at(id))
            .collect()
    }

    fn flag_for(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.lookup(&c.to_uppercase()))
            .unwrap_or_else(|| self.catalog.sentinel())
            .flag()
    }

    fn name_for(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.lookup(c))
            .map_or(UNKNOWN_NAME, Country::name)
    }
}
