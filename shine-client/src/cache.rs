//! Keyed directory cache
//!
//! One store for every directory resource, keyed by `(kind, id)`, plus the
//! ordered ids each list query returned. Stores share it through
//! [`SharedCache`], so an invalidation from one page is seen by all.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shared::Page;
use shared::models::{DirectoryEntry, ResourceKind};

/// Cache handle shared between stores
pub type SharedCache = Arc<Mutex<DirectoryCache>>;

pub fn shared_cache() -> SharedCache {
    Arc::new(Mutex::new(DirectoryCache::new()))
}

pub(crate) fn lock(cache: &SharedCache) -> MutexGuard<'_, DirectoryCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ids and paging of one query's result set
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryResult {
    ids: Vec<String>,
    page: u32,
    page_size: u32,
    total_items: u64,
    page_count: u32,
}

#[derive(Default)]
pub struct DirectoryCache {
    entities: HashMap<(ResourceKind, String), Box<dyn Any + Send>>,
    queries: HashMap<(ResourceKind, String), QueryResult>,
}

impl std::fmt::Debug for DirectoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryCache")
            .field("entities", &self.entities.len())
            .field("queries", &self.queries.len())
            .finish()
    }
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put<T>(&mut self, entity: T)
    where
        T: DirectoryEntry + Clone + Send + 'static,
    {
        self.entities
            .insert((T::KIND, entity.id().to_string()), Box::new(entity));
    }

    pub fn get<T>(&self, id: &str) -> Option<T>
    where
        T: DirectoryEntry + Clone + Send + 'static,
    {
        self.entities
            .get(&(T::KIND, id.to_string()))
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    /// Remember `page` as the result of query `key`
    pub fn store_page<T>(&mut self, key: &str, page: &Page<T>)
    where
        T: DirectoryEntry + Clone + Send + 'static,
    {
        let ids = page.items.iter().map(|item| item.id().to_string()).collect();
        for item in &page.items {
            self.put(item.clone());
        }
        self.queries.insert(
            (T::KIND, key.to_string()),
            QueryResult {
                ids,
                page: page.page,
                page_size: page.page_size,
                total_items: page.total_items,
                page_count: page.page_count,
            },
        );
    }

    /// Rebuild a cached result set; `None` if any member was evicted
    pub fn page<T>(&self, key: &str) -> Option<Page<T>>
    where
        T: DirectoryEntry + Clone + Send + 'static,
    {
        let result = self.queries.get(&(T::KIND, key.to_string()))?;
        let items = result
            .ids
            .iter()
            .map(|id| self.get::<T>(id))
            .collect::<Option<Vec<_>>>()?;
        Some(Page {
            items,
            page: result.page,
            page_size: result.page_size,
            total_items: result.total_items,
            page_count: result.page_count,
        })
    }

    /// Forget every entity and query of `kind`
    pub fn invalidate(&mut self, kind: ResourceKind) {
        self.entities.retain(|(k, _), _| *k != kind);
        self.queries.retain(|(k, _), _| *k != kind);
        tracing::debug!(?kind, "directory cache invalidated");
    }

    /// Forget one entity and every query that listed it
    pub fn invalidate_entity(&mut self, kind: ResourceKind, id: &str) {
        self.entities.remove(&(kind, id.to_string()));
        self.queries
            .retain(|(k, _), result| *k != kind || !result.ids.iter().any(|i| i == id));
    }

    pub fn entity_count(&self, kind: ResourceKind) -> usize {
        self.entities.keys().filter(|(k, _)| *k == kind).count()
    }

    pub fn query_count(&self, kind: ResourceKind) -> usize {
        self.queries.keys().filter(|(k, _)| *k == kind).count()
    }
}
