//! # Query Executor
//!
//! Executes one parameterized SQL statement inside its own transaction and
//! returns a tagged [`QueryResult`]. The executor **never** returns `Err`
//! and never panics past its boundary: every failure path - acquiring the
//! connection, binding, execution, commit - resolves to
//! [`QueryResult::Error`].
//!
//! ## One Call, One Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  execute(sql, params)                                           │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  pool.begin() ── acquire connection, auto-commit OFF            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  classify leading keyword                                       │
//! │  ├── select / show  → fetch all rows      → Rows(Vec<Row>)      │
//! │  ├── insert         → execute + last id   → GeneratedKey(i64)   │
//! │  │                    (no key reported    → AffectedRows)       │
//! │  └── anything else  → execute             → AffectedRows(u64)   │
//! │       │                                                         │
//! │       ├── success → COMMIT → variant                            │
//! │       └── failure → ROLLBACK → Error(message)                   │
//! │                                                                 │
//! │  Connection returns to the pool on every path (RAII).           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retry, cancellation, or timeout lives here; bounding a slow query is
//! the caller's job (wrap the future in `tokio::time::timeout`).

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Either, Executor, Sqlite, SqlitePool, Statement, Transaction};
use tracing::{debug, error};

use crate::row::{Row, SqlValue};

// =============================================================================
// QueryResult
// =============================================================================

/// Tagged outcome of one database call. Exactly one variant is ever
/// active; check [`QueryResult::has_error`] before consuming any other
/// accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Ordered rows from a `select`/`show` statement.
    Rows(Vec<Row>),
    /// Database-assigned key from an `insert`.
    GeneratedKey(i64),
    /// Affected-row count from an update/delete (or an insert for which
    /// the driver reported no generated key).
    AffectedRows(u64),
    /// Descriptive failure message. The transaction was rolled back.
    Error(String),
}

impl QueryResult {
    /// Whether this call failed. Must be checked before the accessors.
    pub fn has_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }

    /// The failure message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryResult::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Fetched rows, if this was a row-returning statement.
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            QueryResult::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// The generated key, if this was an insert that produced one.
    pub fn generated_key(&self) -> Option<i64> {
        match self {
            QueryResult::GeneratedKey(key) => Some(*key),
            _ => None,
        }
    }

    /// The affected-row count, if this was a mutation.
    pub fn affected_rows(&self) -> Option<u64> {
        match self {
            QueryResult::AffectedRows(count) => Some(*count),
            _ => None,
        }
    }

    /// The variant name, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            QueryResult::Rows(_) => "rows",
            QueryResult::GeneratedKey(_) => "generated_key",
            QueryResult::AffectedRows(_) => "affected_rows",
            QueryResult::Error(_) => "error",
        }
    }
}

// =============================================================================
// Statement classification
// =============================================================================

/// What shape of result a statement produces, decided by its leading
/// keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementKind {
    /// `select` / `show`: fetch all rows.
    Fetch,
    /// `insert`: execute, then read the generated key.
    Insert,
    /// Everything else: execute, report affected rows.
    Mutation,
}

impl StatementKind {
    fn classify(sql: &str) -> Self {
        let keyword = sql
            .trim_start()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match keyword.as_str() {
            "select" | "show" => StatementKind::Fetch,
            "insert" => StatementKind::Insert,
            _ => StatementKind::Mutation,
        }
    }
}

// =============================================================================
// QueryExecutor
// =============================================================================

/// Transactional statement executor over a shared pool.
///
/// Cheap to clone; each call borrows its own pooled connection, so
/// concurrent invocation is safe. The pool's connection capacity is the
/// real bottleneck and is configured at [`crate::pool::DbConfig`].
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    pool: SqlitePool,
}

impl QueryExecutor {
    /// Creates a new executor over the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        QueryExecutor { pool }
    }

    /// Executes one parameterized statement in a fresh transaction.
    ///
    /// Parameters bind positionally in the order supplied; a placeholder
    /// count mismatch surfaces as [`QueryResult::Error`], never a panic.
    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> QueryResult {
        debug!(sql, param_count = params.len(), "executing statement");

        // Prepare up front to learn the declared parameter count. SQLite
        // itself binds missing parameters as NULL and ignores extras, so
        // a mismatched call would succeed with wrong results instead of
        // failing; the count has to be enforced here.
        let declared = match self.pool.prepare(sql).await {
            Ok(statement) => match statement.parameters() {
                Some(Either::Right(count)) => count,
                Some(Either::Left(types)) => types.len(),
                None => params.len(),
            },
            Err(e) => {
                error!(error = %e, "prepare failed");
                return QueryResult::Error(e.to_string());
            }
        };

        if declared != params.len() {
            error!(declared, supplied = params.len(), "parameter count mismatch");
            return QueryResult::Error(format!(
                "parameter count mismatch: statement declares {declared}, got {}",
                params.len()
            ));
        }

        let mut tx = match self.pool.begin().await {
            Ok(tx) => tx,
            Err(e) => {
                error!(error = %e, "failed to acquire connection");
                return QueryResult::Error(format!("connection failed: {e}"));
            }
        };

        match run_statement(&mut tx, sql, params).await {
            Ok(result) => match tx.commit().await {
                Ok(()) => result,
                Err(e) => {
                    error!(error = %e, "commit failed");
                    QueryResult::Error(format!("commit failed: {e}"))
                }
            },
            Err(e) => {
                // The original error is what the caller needs to see; a
                // rollback failure on top of it is only logged.
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "rollback failed");
                }
                debug!(error = %e, "statement failed; rolled back");
                // The driver message passes through verbatim; DbError's
                // Display adds the one "Query failed" prefix downstream.
                QueryResult::Error(e.to_string())
            }
        }
    }
}

/// Runs the classified statement inside the open transaction.
async fn run_statement(
    tx: &mut Transaction<'_, Sqlite>,
    sql: &str,
    params: &[SqlValue],
) -> Result<QueryResult, sqlx::Error> {
    let query = bind_params(sqlx::query(sql), params);

    match StatementKind::classify(sql) {
        StatementKind::Fetch => {
            let rows: Vec<SqliteRow> = query.fetch_all(&mut **tx).await?;
            let rows = rows.iter().map(Row::from_sqlite).collect::<Vec<_>>();
            debug!(count = rows.len(), "fetched rows");
            Ok(QueryResult::Rows(rows))
        }
        StatementKind::Insert => {
            let done = query.execute(&mut **tx).await?;
            let key = done.last_insert_rowid();
            if key > 0 {
                Ok(QueryResult::GeneratedKey(key))
            } else {
                // Driver reported no key (e.g. WITHOUT ROWID target).
                Ok(QueryResult::AffectedRows(done.rows_affected()))
            }
        }
        StatementKind::Mutation => {
            let done = query.execute(&mut **tx).await?;
            Ok(QueryResult::AffectedRows(done.rows_affected()))
        }
    }
}

/// Binds parameters positionally, in the order supplied.
fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Boolean(v) => query.bind(*v),
            SqlValue::Timestamp(v) => query.bind(*v),
            SqlValue::Blob(v) => query.bind(v.clone()),
        };
    }
    query
}

// =============================================================================
// Unit Tests
// =============================================================================
