//! # Database Error Types
//!
//! Error types for the cache layer and database setup.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Error Propagation                          │
//! │                                                                 │
//! │  SQLite error (sqlx::Error)                                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  QueryResult::Error ← the executor NEVER returns Err; every     │
//! │       │               driver failure becomes data               │
//! │       ▼                                                         │
//! │  DbError (this module) ← the cache layer re-raises the          │
//! │       │                  executor's message as a typed error    │
//! │       ▼                                                         │
//! │  Calling layer formats the user-visible message                 │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database and cache layer errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - An update targeted an id that no longer exists
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Database connection or pool setup failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A statement failed at the database. Carries the executor's error
    /// message verbatim - the cache layer never rewrites it.
    #[error("Query failed: {0}")]
    Execution(String),

    /// The executor returned a variant the operation cannot use
    /// (e.g. rows from a statement the cache issued as an update).
    #[error("Unexpected query result: expected {expected}, got {got}")]
    UnexpectedResult {
        expected: &'static str,
        got: &'static str,
    },
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_display_prefixes_driver_message_once() {
        // The executor hands over the driver message verbatim; this
        // Display is the only place a "Query failed" prefix is added.
        let err = DbError::Execution("UNIQUE constraint failed: Users.username".to_string());
        assert_eq!(
            err.to_string(),
            "Query failed: UNIQUE constraint failed: Users.username"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = DbError::not_found("Products", 7);
        assert_eq!(err.to_string(), "Products not found: 7");
    }
}
