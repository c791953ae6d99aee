//! # shopfront-core: Pure Logic for Shopfront
//!
//! Entity types and the in-memory algorithms of the storefront, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Shopfront Architecture                       │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              Calling layer (UI / services)                │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │            ★ shopfront-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐  ┌────────────┐  ┌────────┐  ┌────────────┐  │  │
//! │  │  │  types  │  │ validation │  │  sort  │  │   search   │  │  │
//! │  │  │ Product │  │   rules    │  │ quick/ │  │  bisection │  │  │
//! │  │  │  Order  │  │   checks   │  │ merge  │  │            │  │  │
//! │  │  └─────────┘  └────────────┘  └────────┘  └────────────┘  │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └──────────────────────────┬────────────────────────────────┘  │
//! │                             │                                   │
//! │  ┌──────────────────────────▼────────────────────────────────┐  │
//! │  │             shopfront-db (Database Layer)                 │  │
//! │  │       query executor, row mapper, entity caches           │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity types (Product, Category, Order, User, ...)
//! - [`error`] - Validation error types
//! - [`validation`] - Input validation rules
//! - [`sort`] - Comparator-driven quicksort and mergesort
//! - [`search`] - Binary search over pre-sorted collections
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Total parsing**: enum parsing never fails, it falls back to a
//!    default (the same discipline the row coercions in shopfront-db use)
//! 4. **Explicit Errors**: validation errors are typed, never strings

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod search;
pub mod sort;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use search::binary_search_by_key;
pub use sort::{mergesort, quicksort};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or category name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a search term.
///
/// Longer terms are rejected before they reach the database; they would
/// only produce pathological LIKE patterns.
pub const MAX_SEARCH_TERM_LEN: usize = 100;

/// Maximum quantity for a single order line.
pub const MAX_ITEM_QUANTITY: i64 = 999;
