//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite, plus the
//! top-level [`Database`] handle that owns one cache per entity type.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │            SqlitePool                   │                            │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐        │                            │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...    │  (max_connections)         │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘        │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QueryExecutor ──► shared by four EntityCache instances                 │
//! │  (products / categories / orders / users), built ONCE at startup        │
//! │  and handed out as Arc clones so every caller shares one cache          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Writers don't block readers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use shopfront_core::{Category, Order, OrderItem, Product, User};

use crate::cache::EntityCache;
use crate::error::{DbError, DbResult};
use crate::executor::{QueryExecutor, QueryResult};
use crate::migrations;
use crate::record::order::{order_item_from_row, SELECT_ITEMS_BY_ORDER};
use crate::row::SqlValue;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/shopfront.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a desktop storefront)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    /// The file is created on first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing executor and cache access.
///
/// Each entity type gets exactly one [`EntityCache`] instance, built here
/// at startup. Accessors hand out `Arc` clones of that same instance, so
/// every part of the application observes one coherent cache. Cloning the
/// handle itself shares the pool and the caches.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./shopfront.db")).await?;
/// let widget = db.products().get(7).await?;
/// let shirts = db.products().search("shirt").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
    executor: QueryExecutor,
    products: Arc<EntityCache<Product>>,
    categories: Arc<EntityCache<Category>>,
    orders: Arc<EntityCache<Order>>,
    users: Arc<EntityCache<User>>,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    /// 5. Builds the per-entity caches
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the
            // last transaction on crash
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        if config.run_migrations {
            info!("Running database migrations");
            migrations::run_migrations(&pool).await?;
            info!("Migrations complete");
        }

        let executor = QueryExecutor::new(pool.clone());

        Ok(Database {
            pool,
            products: Arc::new(EntityCache::new(executor.clone())),
            categories: Arc::new(EntityCache::new(executor.clone())),
            orders: Arc::new(EntityCache::new(executor.clone())),
            users: Arc::new(EntityCache::new(executor.clone())),
            executor,
        })
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by the executor or caches.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the query executor for raw parameterized statements.
    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// Returns the shared product cache.
    pub fn products(&self) -> Arc<EntityCache<Product>> {
        Arc::clone(&self.products)
    }

    /// Returns the shared category cache.
    pub fn categories(&self) -> Arc<EntityCache<Category>> {
        Arc::clone(&self.categories)
    }

    /// Returns the shared order cache.
    pub fn orders(&self) -> Arc<EntityCache<Order>> {
        Arc::clone(&self.orders)
    }

    /// Returns the shared user cache.
    pub fn users(&self) -> Arc<EntityCache<User>> {
        Arc::clone(&self.users)
    }

    /// Fetches the line items of an order, in product-id order.
    ///
    /// OrderItems are keyed by (order_id, product_id) and never change
    /// after the order is placed, so they bypass the per-type caches and
    /// go straight through the executor.
    pub async fn order_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let result = self
            .executor
            .execute(SELECT_ITEMS_BY_ORDER, &[SqlValue::Integer(order_id)])
            .await;

        match result {
            QueryResult::Rows(rows) => Ok(rows.iter().filter_map(order_item_from_row).collect()),
            QueryResult::Error(msg) => Err(DbError::Execution(msg)),
            other => Err(DbError::UnexpectedResult {
                expected: "rows",
                got: other.variant_name(),
            }),
        }
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all executor and cache operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
