//! # Product Record
//!
//! SQL bindings and row mapping for [`Product`].

use shopfront_core::Product;

use crate::record::{like_pattern, Record};
use crate::row::{Row, SqlValue};

const SELECT_BY_ID: &str = "SELECT product_id, product_name, description, price, \
     category_id, stock_quantity, image_url, created_at, updated_at \
     FROM Products WHERE product_id = ?1";

const INSERT: &str = "INSERT INTO Products (product_name, description, price, \
     category_id, stock_quantity, image_url, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const UPDATE: &str = "UPDATE Products SET product_name = ?2, description = ?3, \
     price = ?4, category_id = ?5, stock_quantity = ?6, image_url = ?7, \
     updated_at = ?8 WHERE product_id = ?1";

const DELETE: &str = "DELETE FROM Products WHERE product_id = ?1";

const SEARCH: &str = "SELECT product_id, product_name, description, price, \
     category_id, stock_quantity, image_url, created_at, updated_at \
     FROM Products WHERE lower(product_name) LIKE ?1 ORDER BY product_name";

/// A non-positive category id means "no category": it binds as NULL so
/// the foreign key doesn't reject it, and NULL reads back as 0.
fn category_param(category_id: i64) -> SqlValue {
    if category_id > 0 {
        SqlValue::from(category_id)
    } else {
        SqlValue::Null
    }
}

impl Record for Product {
    const TABLE: &'static str = "Products";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(&self, id: i64) -> Self {
        Product { id, ..self.clone() }
    }

    fn from_row(row: &Row) -> Option<Self> {
        if row.is_empty() {
            return None;
        }

        Some(Product {
            id: row.integer("product_id"),
            name: row.text("product_name").unwrap_or_default(),
            description: row.text("description"),
            price: row.decimal("price"),
            category_id: row.integer("category_id"),
            stock_quantity: row.integer("stock_quantity"),
            image_url: row.text("image_url"),
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
                SqlValue::from(self.name.clone()),
                SqlValue::from(self.description.clone()),
                SqlValue::from(self.price),
                category_param(self.category_id),
                SqlValue::from(self.stock_quantity),
                SqlValue::from(self.image_url.clone()),
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
                SqlValue::from(self.name.clone()),
                SqlValue::from(self.description.clone()),
                SqlValue::from(self.price),
                category_param(self.category_id),
                SqlValue::from(self.stock_quantity),
                SqlValue::from(self.image_url.clone()),
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

// =============================================================================
// Unit Tests
// =============================================================================
