//! # Category Record
//!
//! SQL bindings and row mapping for [`Category`].

use shopfront_core::Category;

use crate::record::{like_pattern, Record};
use crate::row::{Row, SqlValue};

const SELECT_BY_ID: &str =
    "SELECT category_id, category_name, description FROM Categories WHERE category_id = ?1";

const INSERT: &str = "INSERT INTO Categories (category_name, description) VALUES (?1, ?2)";

const UPDATE: &str =
    "UPDATE Categories SET category_name = ?2, description = ?3 WHERE category_id = ?1";

const DELETE: &str = "DELETE FROM Categories WHERE category_id = ?1";

const SEARCH: &str = "SELECT category_id, category_name, description FROM Categories \
     WHERE lower(category_name) LIKE ?1 ORDER BY category_name";

impl Record for Category {
    const TABLE: &'static str = "Categories";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(&self, id: i64) -> Self {
        Category { id, ..self.clone() }
    }

    fn from_row(row: &Row) -> Option<Self> {
        if row.is_empty() {
            return None;
        }

        Some(Category {
            id: row.integer("category_id"),
            name: row.text("category_name").unwrap_or_default(),
            description: row.text("description"),
        })
    }

    fn select_by_id() -> &'static str {
        SELECT_BY_ID
    }

    fn insert_statement(&self) -> (&'static str, Vec<SqlValue>) {
        (
            INSERT,
            vec![
                SqlValue::from(self.name.clone()),
                SqlValue::from(self.description.clone()),
            ],
        )
    }

    fn update_statement(&self) -> (&'static str, Vec<SqlValue>) {
        (
            UPDATE,
            vec![
                SqlValue::from(self.id),
                SqlValue::from(self.name.clone()),
                SqlValue::from(self.description.clone()),
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
