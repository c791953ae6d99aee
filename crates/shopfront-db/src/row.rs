//! # Row Abstraction
//!
//! An untyped database row (column name → value) with **total** coercion
//! accessors. This is the seam between the dynamic SQL world of the
//! executor and the typed entities of shopfront-core.
//!
//! ## Coercion Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │           Accessor      Fallback on null / wrong type           │
//! │           ─────────     ──────────────────────────────          │
//! │           integer()     0                                       │
//! │           text()        None                                    │
//! │           decimal()     0.0                                     │
//! │           timestamp()   None                                    │
//! │           boolean()     false                                   │
//! │                                                                 │
//! │  No accessor may panic or return Err. A missing column is a     │
//! │  recoverable default, never a fatal mapping error.              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mapping is pure: identical rows always yield identical values,
//! independent of call order or cache state.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as SqlxRow, TypeInfo, ValueRef};

// =============================================================================
// SqlValue
// =============================================================================

/// A single dynamically-typed SQL value, used both for binding parameters
/// and for representing fetched columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    Blob(Vec<u8>),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Boolean(v)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SqlValue::Null)
    }
}

// =============================================================================
// Row
// =============================================================================

/// One fetched row: column name → [`SqlValue`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: HashMap<String, SqlValue>,
}

impl Row {
    /// Builds a row from an explicit column map (used by tests and by
    /// callers that synthesize rows).
    pub fn from_columns(columns: HashMap<String, SqlValue>) -> Self {
        Row { columns }
    }

    /// Decodes a sqlx row by storage class.
    ///
    /// Undecodable columns degrade to `Null` - the coercion accessors
    /// turn that into per-field fallbacks downstream.
    pub(crate) fn from_sqlite(row: &SqliteRow) -> Self {
        let mut columns = HashMap::with_capacity(row.len());

        for (index, column) in row.columns().iter().enumerate() {
            let value = match row.try_get_raw(index) {
                Ok(raw) if raw.is_null() => SqlValue::Null,
                Ok(raw) => {
                    let type_name = raw.type_info().name().to_string();
                    match type_name.as_str() {
                        "INTEGER" | "BOOLEAN" => row
                            .try_get::<i64, _>(index)
                            .map(SqlValue::Integer)
                            .unwrap_or(SqlValue::Null),
                        "REAL" | "NUMERIC" => row
                            .try_get::<f64, _>(index)
                            .map(SqlValue::Real)
                            .unwrap_or(SqlValue::Null),
                        "BLOB" => row
                            .try_get::<Vec<u8>, _>(index)
                            .map(SqlValue::Blob)
                            .unwrap_or(SqlValue::Null),
                        // TEXT, DATE, TIME, DATETIME all arrive as text.
                        _ => row
                            .try_get::<String, _>(index)
                            .map(SqlValue::Text)
                            .unwrap_or(SqlValue::Null),
                    }
                }
                Err(_) => SqlValue::Null,
            };

            columns.insert(column.name().to_string(), value);
        }

        Row { columns }
    }

    /// Whether the row carries no columns at all. `Record::from_row`
    /// treats an empty row as "no entity".
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Raw access to a column value.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns.get(column)
    }

    // -------------------------------------------------------------------------
    // Total coercion accessors
    // -------------------------------------------------------------------------

    /// Integer coercion; fallback `0`.
    ///
    /// Accepts INTEGER and BOOLEAN storage; REAL truncates. Text never
    /// parses - a string in an integer column is "wrong type", not data.
    pub fn integer(&self, column: &str) -> i64 {
        match self.columns.get(column) {
            Some(SqlValue::Integer(v)) => *v,
            Some(SqlValue::Boolean(v)) => *v as i64,
            Some(SqlValue::Real(v)) => *v as i64,
            _ => 0,
        }
    }

    /// Text coercion; fallback `None`.
    pub fn text(&self, column: &str) -> Option<String> {
        match self.columns.get(column) {
            Some(SqlValue::Text(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Decimal coercion; fallback `0.0`.
    pub fn decimal(&self, column: &str) -> f64 {
        match self.columns.get(column) {
            Some(SqlValue::Real(v)) => *v,
            Some(SqlValue::Integer(v)) => *v as f64,
            _ => 0.0,
        }
    }

    /// Timestamp coercion; fallback `None`.
    ///
    /// SQLite stores timestamps as text; both RFC 3339 and the
    /// space-separated `YYYY-MM-DD HH:MM:SS[.f][±TZ]` shapes are accepted.
    pub fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        match self.columns.get(column) {
            Some(SqlValue::Timestamp(v)) => Some(*v),
            Some(SqlValue::Text(v)) => parse_timestamp(v),
            _ => None,
        }
    }

    /// Boolean coercion; fallback `false`. Non-zero integers are true.
    pub fn boolean(&self, column: &str) -> bool {
        match self.columns.get(column) {
            Some(SqlValue::Boolean(v)) => *v,
            Some(SqlValue::Integer(v)) => *v != 0,
            _ => false,
        }
    }
}

/// Parses the timestamp text shapes SQLite produces. Total: unparseable
/// input is `None`.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // sqlx's chrono encoding: "2024-01-01 12:00:00.000000+00:00"
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    // CURRENT_TIMESTAMP and friends: naive, assumed UTC.
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

// =============================================================================
// Unit Tests
// =============================================================================
