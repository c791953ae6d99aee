//! # Entity Cache
//!
//! A per-entity-type, write-through cache layered on the query executor.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Entity Cache Flow                           │
//! │                                                                 │
//! │  get(id) ──► id-map hit? ──► return immediately (no DB call)    │
//! │                 │                                               │
//! │                 ▼ miss                                          │
//! │          QueryExecutor::execute(select, [id])                   │
//! │                 │                                               │
//! │                 ▼                                               │
//! │          Record::from_row ──► populate id-map ──► return        │
//! │                                                                 │
//! │  insert/update/delete ──► database FIRST, cache only after      │
//! │  the call has definitively succeeded; any success clears the    │
//! │  ENTIRE search map (coarse invalidation, not per-term)          │
//! │                                                                 │
//! │  search(term) ──► normalize (trim + lowercase) ──► search-map   │
//! │  hit? return : query + map + populate                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! One `std::sync::Mutex` guards both maps. It is held only across the
//! in-memory mutation, never across the database round trip, so a slow
//! query doesn't serialize unrelated readers. The ordering guarantee is
//! the important one: no reader ever observes a half-applied write,
//! because shared state mutates only after the database call succeeded.
//!
//! ## Failure Semantics
//! Executor errors propagate as [`DbError::Execution`] with the message
//! untouched, and the cache is left exactly as it was before the call.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::executor::{QueryExecutor, QueryResult};
use crate::record::Record;
use crate::row::SqlValue;

const POISONED: &str = "entity cache mutex poisoned";

/// Both maps live under one lock so a write invalidates them atomically.
#[derive(Debug)]
struct CacheState<R> {
    /// id → entity.
    by_id: HashMap<i64, R>,
    /// normalized search term → ordered matches at search time.
    searches: HashMap<String, Vec<R>>,
}

impl<R> CacheState<R> {
    fn new() -> Self {
        CacheState {
            by_id: HashMap::new(),
            searches: HashMap::new(),
        }
    }
}

/// Write-through cache for one entity type.
///
/// One instance per entity type, owned by the [`crate::pool::Database`]
/// handle; nothing here is a process-wide static. Safe for concurrent
/// use from multiple tasks.
#[derive(Debug)]
pub struct EntityCache<R: Record> {
    executor: QueryExecutor,
    state: Mutex<CacheState<R>>,
}

impl<R: Record> EntityCache<R> {
    /// Creates an empty cache over the given executor.
    pub fn new(executor: QueryExecutor) -> Self {
        EntityCache {
            executor,
            state: Mutex::new(CacheState::new()),
        }
    }

    /// Returns the entity, from cache when possible.
    ///
    /// `Ok(None)` means the database has no such row. A fetch failure
    /// returns the executor's error untouched and leaves the cache
    /// unchanged.
    pub async fn get(&self, id: i64) -> DbResult<Option<R>> {
        if let Some(found) = self.state.lock().expect(POISONED).by_id.get(&id).cloned() {
            debug!(table = R::TABLE, id, "cache hit");
            return Ok(Some(found));
        }

        debug!(table = R::TABLE, id, "cache miss; fetching");
        let result = self
            .executor
            .execute(R::select_by_id(), &[SqlValue::Integer(id)])
            .await;

        match result {
            QueryResult::Rows(rows) => {
                let entity = rows.first().and_then(R::from_row);
                if let Some(found) = &entity {
                    self.state
                        .lock()
                        .expect(POISONED)
                        .by_id
                        .insert(id, found.clone());
                }
                Ok(entity)
            }
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(unexpected("rows", &other)),
        }
    }

    /// Inserts the entity, returning a copy carrying the generated key.
    ///
    /// Write-through: the database call happens first; only on success
    /// does the id-map gain the entry and the search map clear. When the
    /// driver reports no generated key the entity is returned as given
    /// (and cached only if it already carries a positive id).
    pub async fn insert(&self, record: &R) -> DbResult<R> {
        let (sql, params) = record.insert_statement();

        match self.executor.execute(sql, &params).await {
            QueryResult::GeneratedKey(key) => {
                debug!(table = R::TABLE, key, "inserted; caching and clearing searches");
                let stored = record.with_id(key);
                let mut state = self.state.lock().expect(POISONED);
                state.by_id.insert(key, stored.clone());
                state.searches.clear();
                Ok(stored)
            }
            QueryResult::AffectedRows(count) if count > 0 => {
                let stored = record.clone();
                let mut state = self.state.lock().expect(POISONED);
                if stored.id() > 0 {
                    state.by_id.insert(stored.id(), stored.clone());
                }
                state.searches.clear();
                Ok(stored)
            }
            QueryResult::AffectedRows(_) => {
                Err(DbError::Execution("insert affected no rows".to_string()))
            }
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(unexpected("generated_key", &other)),
        }
    }

    /// Updates the entity in place.
    ///
    /// Zero affected rows is [`DbError::NotFound`]; the cache is only
    /// touched after a definitive success, so a failed update leaves
    /// every reader seeing the pre-call state.
    pub async fn update(&self, record: &R) -> DbResult<()> {
        let (sql, params) = record.update_statement();

        match self.executor.execute(sql, &params).await {
            QueryResult::AffectedRows(count) if count > 0 => {
                debug!(table = R::TABLE, id = record.id(), "updated; refreshing cache");
                let mut state = self.state.lock().expect(POISONED);
                state.by_id.insert(record.id(), record.clone());
                state.searches.clear();
                Ok(())
            }
            QueryResult::AffectedRows(_) => Err(DbError::not_found(R::TABLE, record.id())),
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(unexpected("affected_rows", &other)),
        }
    }

    /// Deletes by id. `Ok(true)` when a row was removed, `Ok(false)` when
    /// no such row existed (cache untouched in that case).
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = self
            .executor
            .execute(R::delete_by_id(), &[SqlValue::Integer(id)])
            .await;

        match result {
            QueryResult::AffectedRows(count) if count > 0 => {
                debug!(table = R::TABLE, id, "deleted; evicting and clearing searches");
                let mut state = self.state.lock().expect(POISONED);
                state.by_id.remove(&id);
                state.searches.clear();
                Ok(true)
            }
            QueryResult::AffectedRows(_) => Ok(false),
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(unexpected("affected_rows", &other)),
        }
    }

    /// Searches by term, serving repeats from the search cache.
    ///
    /// The cache key is the trimmed, lower-cased term - nothing more.
    /// Interior whitespace and punctuation are preserved, so terms that
    /// differ only in spacing are distinct entries. Every successful
    /// write to this entity type clears the whole search map.
    pub async fn search(&self, term: &str) -> DbResult<Vec<R>> {
        let key = term.trim().to_lowercase();

        if let Some(hit) = self.state.lock().expect(POISONED).searches.get(&key).cloned() {
            debug!(table = R::TABLE, term = %key, hits = hit.len(), "search cache hit");
            return Ok(hit);
        }

        debug!(table = R::TABLE, term = %key, "search cache miss; querying");
        let (sql, params) = R::search_statement(&key);

        match self.executor.execute(sql, &params).await {
            QueryResult::Rows(rows) => {
                let matches: Vec<R> = rows.iter().filter_map(R::from_row).collect();
                self.state
                    .lock()
                    .expect(POISONED)
                    .searches
                    .insert(key, matches.clone());
                Ok(matches)
            }
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(unexpected("rows", &other)),
        }
    }

    /// Drops both maps unconditionally.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect(POISONED);
        state.by_id.clear();
        state.searches.clear();
        debug!(table = R::TABLE, "cache cleared");
    }

    /// Whether the id-map currently holds this id (no database call).
    pub fn is_cached(&self, id: i64) -> bool {
        self.state.lock().expect(POISONED).by_id.contains_key(&id)
    }

    /// Number of cached search terms (no database call).
    pub fn cached_search_count(&self) -> usize {
        self.state.lock().expect(POISONED).searches.len()
    }
}

fn unexpected(expected: &'static str, got: &QueryResult) -> DbError {
    DbError::UnexpectedResult {
        expected,
        got: got.variant_name(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use shopfront_core::{Category, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database")
    }

    #[tokio::test]
    async fn test_get_miss_then_hit() {
        let db = test_db().await;
        let cache = db.categories();

        let stored = cache.insert(&Category::new("Tools")).await.expect("insert");
        assert!(stored.id > 0);

        // Remove the row behind the cache's back; a hit must not notice.
        let wiped = db
            .executor()
            .execute(
                "DELETE FROM Categories WHERE category_id = ?1",
                &[SqlValue::Integer(stored.id)],
            )
            .await;
        assert_eq!(wiped.affected_rows(), Some(1));

        let from_cache = cache.get(stored.id).await.expect("get");
        assert_eq!(from_cache, Some(stored.clone()));

        // A cleared cache goes back to the database and finds nothing.
        cache.clear();
        assert_eq!(cache.get(stored.id).await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none_and_not_cached() {
        let db = test_db().await;
        let cache = db.products();

        assert_eq!(cache.get(12345).await.expect("get"), None);
        assert!(!cache.is_cached(12345));
    }

    #[tokio::test]
    async fn test_update_refreshes_cache() {
        let db = test_db().await;
        let cache = db.products();

        let stored = cache
            .insert(&Product::new("Widget", 9.99, 0, 5))
            .await
            .expect("insert");

        let mut changed = stored.clone();
        changed.stock_quantity = 0;
        cache.update(&changed).await.expect("update");

        let fetched = cache.get(stored.id).await.expect("get").expect("present");
        assert_eq!(fetched.stock_quantity, 0);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found_and_cache_untouched() {
        let db = test_db().await;
        let cache = db.products();

        let stored = cache
            .insert(&Product::new("Widget", 9.99, 0, 5))
            .await
            .expect("insert");

        let phantom = Product::new("Ghost", 1.0, 0, 1).with_id(stored.id + 100);
        let err = cache.update(&phantom).await.expect_err("not found");
        assert!(matches!(err, DbError::NotFound { .. }));

        assert!(!cache.is_cached(phantom.id));
        assert_eq!(
            cache.get(stored.id).await.expect("get"),
            Some(stored.clone())
        );
    }

    #[tokio::test]
    async fn test_delete_evicts() {
        let db = test_db().await;
        let cache = db.products();

        let stored = cache
            .insert(&Product::new("Widget", 9.99, 0, 5))
            .await
            .expect("insert");
        assert!(cache.is_cached(stored.id));

        assert!(cache.delete(stored.id).await.expect("delete"));
        assert!(!cache.is_cached(stored.id));
        assert_eq!(cache.get(stored.id).await.expect("get"), None);

        // Deleting again finds nothing; not an error.
        assert!(!cache.delete(stored.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn test_search_caches_and_writes_invalidate() {
        let db = test_db().await;
        let cache = db.products();

        cache
            .insert(&Product::new("Red Shirt", 15.0, 0, 3))
            .await
            .expect("insert");
        cache
            .insert(&Product::new("Blue Shirt", 15.0, 0, 3))
            .await
            .expect("insert");

        let hits = cache.search("  SHIRT ").await.expect("search");
        assert_eq!(hits.len(), 2);
        assert_eq!(cache.cached_search_count(), 1);

        // Terms differing only in interior spacing are distinct entries.
        let none = cache.search("red  shirt").await.expect("search");
        assert!(none.is_empty());
        assert_eq!(cache.cached_search_count(), 2);

        // Any write clears the whole search map.
        cache
            .insert(&Product::new("Green Shirt", 15.0, 0, 3))
            .await
            .expect("insert");
        assert_eq!(cache.cached_search_count(), 0);

        let hits = cache.search("shirt").await.expect("search");
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_cache_unchanged() {
        let db = test_db().await;
        let cache = db.users();

        let alice = shopfront_core::User::new("alice", "alice@example.com", "hash");
        let stored = cache.insert(&alice).await.expect("insert");

        // Populate the search cache, then fail a write: duplicate username.
        cache.search("alice").await.expect("search");
        assert_eq!(cache.cached_search_count(), 1);

        let err = cache.insert(&alice).await.expect_err("duplicate");
        assert!(matches!(err, DbError::Execution(_)));

        // One prefix, then the driver message untouched.
        let text = err.to_string();
        assert!(text.starts_with("Query failed: "));
        assert!(!text["Query failed: ".len()..]
            .to_lowercase()
            .starts_with("query failed"));

        // Failure invalidates nothing and adds nothing.
        assert_eq!(cache.cached_search_count(), 1);
        assert!(cache.is_cached(stored.id));
    }

    #[tokio::test]
    async fn test_widget_scenario_end_to_end() {
        let db = test_db().await;
        let cache = db.products();

        // Insert → generated key.
        let widget = cache
            .insert(&Product::new("Widget", 9.99, 0, 5))
            .await
            .expect("insert");
        assert!(widget.id > 0);

        // Get returns the product by name.
        let fetched = cache.get(widget.id).await.expect("get").expect("present");
        assert_eq!(fetched.name, "Widget");

        // Update stock to zero; get reflects it.
        let mut sold_out = fetched.clone();
        sold_out.stock_quantity = 0;
        cache.update(&sold_out).await.expect("update");
        let fetched = cache.get(widget.id).await.expect("get").expect("present");
        assert_eq!(fetched.stock_quantity, 0);

        // Search populates the cache with one hit.
        let hits = cache.search("widget").await.expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(cache.cached_search_count(), 1);

        // Delete clears the search cache and the entity is gone.
        assert!(cache.delete(widget.id).await.expect("delete"));
        assert_eq!(cache.cached_search_count(), 0);
        assert_eq!(cache.get(widget.id).await.expect("get"), None);
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        let db = test_db().await;
        let cache = db.products();

        let stored = cache
            .insert(&Product::new("Widget", 9.99, 0, 5))
            .await
            .expect("insert");

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = db.products();
            let id = stored.id;
            handles.push(tokio::spawn(async move { cache.get(id).await }));
        }

        for handle in handles {
            let fetched = handle.await.expect("join").expect("get");
            assert_eq!(fetched.as_ref().map(|p| p.id), Some(stored.id));
        }
    }
}
