//! # Record Module
//!
//! Per-entity SQL bindings behind the [`Record`] trait.
//!
//! ## Why a Trait
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     The Record Seam                             │
//! │                                                                 │
//! │  EntityCache<R> is generic: it knows about caching, write-      │
//! │  through ordering and invalidation - and nothing about SQL.     │
//! │                                                                 │
//! │  Record supplies, per entity type:                              │
//! │  ├── the id accessors (id / with_id)                            │
//! │  ├── from_row: untyped Row → typed entity (total coercions)     │
//! │  └── the five statements (select / insert / update / delete /   │
//! │      search) with their positional parameters                   │
//! │                                                                 │
//! │  The SQL strings are deliberately boring; everything with       │
//! │  actual invariants lives in the cache and executor.             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Records
//!
//! - [`product`] - Products (searchable by name)
//! - [`category`] - Categories (searchable by name)
//! - [`user`] - Users (searchable by username)
//! - [`order`] - Orders (searchable by status) and the OrderItem mapper

pub mod category;
pub mod order;
pub mod product;
pub mod user;

use crate::row::{Row, SqlValue};

/// A cacheable entity with its SQL bindings.
///
/// `from_row` must be pure and total: identical rows yield identical
/// entities, an empty row yields `None`, and absent/mistyped columns fall
/// back to field defaults (the [`Row`] coercion table), never an error.
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Table name, used for logging and error messages.
    const TABLE: &'static str;

    /// The entity's id (0 when not yet persisted).
    fn id(&self) -> i64;

    /// A copy of this entity carrying the database-generated id.
    fn with_id(&self, id: i64) -> Self;

    /// Maps an untyped row to a typed entity; `None` for an empty row.
    fn from_row(row: &Row) -> Option<Self>;

    /// `SELECT ... WHERE id = ?1`.
    fn select_by_id() -> &'static str;

    /// `INSERT` statement plus its positional parameters.
    fn insert_statement(&self) -> (&'static str, Vec<SqlValue>);

    /// `UPDATE ... WHERE id = ?1` statement plus parameters.
    fn update_statement(&self) -> (&'static str, Vec<SqlValue>);

    /// `DELETE ... WHERE id = ?1`.
    fn delete_by_id() -> &'static str;

    /// Search statement plus parameters for an already-normalized
    /// (trimmed, lower-cased) term.
    fn search_statement(term: &str) -> (&'static str, Vec<SqlValue>);
}

/// Builds the `%term%` pattern used by the LIKE-based searches.
pub(crate) fn like_pattern(term: &str) -> SqlValue {
    SqlValue::Text(format!("%{term}%"))
}
