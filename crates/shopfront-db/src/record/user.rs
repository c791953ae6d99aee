//! # User Record
//!
//! SQL bindings and row mapping for [`User`]. The role column round-trips
//! through [`UserRole::as_str`]/[`UserRole::parse`]; an unknown stored
//! role degrades to `Customer` rather than failing the mapping.

use shopfront_core::{User, UserRole};

use crate::record::{like_pattern, Record};
use crate::row::{Row, SqlValue};

const SELECT_BY_ID: &str = "SELECT user_id, username, email, password_hash, role, \
     created_at, updated_at FROM Users WHERE user_id = ?1";

const INSERT: &str = "INSERT INTO Users (username, email, password_hash, role, \
     created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const UPDATE: &str = "UPDATE Users SET username = ?2, email = ?3, password_hash = ?4, \
     role = ?5, updated_at = ?6 WHERE user_id = ?1";

const DELETE: &str = "DELETE FROM Users WHERE user_id = ?1";

const SEARCH: &str = "SELECT user_id, username, email, password_hash, role, \
     created_at, updated_at FROM Users WHERE lower(username) LIKE ?1 ORDER BY username";

impl Record for User {
    const TABLE: &'static str = "Users";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(&self, id: i64) -> Self {
        User { id, ..self.clone() }
    }

    fn from_row(row: &Row) -> Option<Self> {
        if row.is_empty() {
            return None;
        }

        Some(User {
            id: row.integer("user_id"),
            username: row.text("username").unwrap_or_default(),
            email: row.text("email").unwrap_or_default(),
            password_hash: row.text("password_hash").unwrap_or_default(),
            role: UserRole::parse(&row.text("role").unwrap_or_default()),
            created_at: row.timestamp("created_at"),
            updated_at: row.timestamp("updated_at"),
        })
    }

    fn select_by_id() -> &'static str {
        SELECT_BY_ID
    }

    fn insert_statement(&self) -> (&'static str, Vec<SqlValue>) {
        (
            INSERT,
            vec![
                SqlValue::from(self.username.clone()),
                SqlValue::from(self.email.clone()),
                SqlValue::from(self.password_hash.clone()),
                SqlValue::from(self.role.as_str()),
                SqlValue::from(self.created_at),
                SqlValue::from(self.updated_at),
            ],
        )
    }

    fn update_statement(&self) -> (&'static str, Vec<SqlValue>) {
        (
            UPDATE,
            vec![
                SqlValue::from(self.id),
                SqlValue::from(self.username.clone()),
                SqlValue::from(self.email.clone()),
                SqlValue::from(self.password_hash.clone()),
                SqlValue::from(self.role.as_str()),
                SqlValue::from(self.updated_at),
            ],
        )
    }

    fn delete_by_id() -> &'static str {
        DELETE
    }

    fn search_statement(term: &str) -> (&'static str, Vec<SqlValue>) {
        (SEARCH, vec![like_pattern(term)])
    }
}
