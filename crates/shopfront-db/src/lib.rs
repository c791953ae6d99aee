//! # shopfront-db: Database Layer for Shopfront
//!
//! This crate provides database access for the Shopfront storefront.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Data Flow                              │
//! │                                                                         │
//! │  UI / service call (search products, place order, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   shopfront-db (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  EntityCache  │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │  (cache.rs)   │    │  (embedded)  │    │    │
//! │  │   │               │    │               │    │              │    │    │
//! │  │   │ SqlitePool    │◄───│ id map +      │    │ 001_init.sql │    │    │
//! │  │   │ per-type      │    │ search map,   │    │ ...          │    │    │
//! │  │   │ cache wiring  │    │ write-through │    │              │    │    │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘    │    │
//! │  │                                │                                │    │
//! │  │   ┌───────────────┐    ┌───────▼───────┐    ┌──────────────┐    │    │
//! │  │   │    Record     │    │ QueryExecutor │    │ Row/SqlValue │    │    │
//! │  │   │ (record/*.rs) │───►│ (executor.rs) │───►│   (row.rs)   │    │    │
//! │  │   │ SQL per       │    │ one stmt, one │    │ total        │    │    │
//! │  │   │ entity type   │    │ transaction   │    │ coercions    │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │                        SQLite Database (WAL)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, per-type caches
//! - [`executor`] - One-statement-per-transaction query executor
//! - [`row`] - Column-name-keyed rows with total coercion accessors
//! - [`cache`] - Write-through entity + search cache
//! - [`record`] - Per-entity SQL statements and row mapping
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopfront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/shopfront.db")).await?;
//!
//! let widget = db.products().get(7).await?;
//! let shirts = db.products().search("shirt").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod error;
pub mod executor;
pub mod migrations;
pub mod pool;
pub mod record;
pub mod row;

// =============================================================================
// Re-exports
// =============================================================================

pub use cache::EntityCache;
pub use error::{DbError, DbResult};
pub use executor::{QueryExecutor, QueryResult};
pub use pool::{Database, DbConfig};
pub use record::Record;
pub use row::{Row, SqlValue};
