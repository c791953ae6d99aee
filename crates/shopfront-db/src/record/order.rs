//! # Order Record
//!
//! SQL bindings and row mapping for [`Order`], plus the [`OrderItem`]
//! mapper. OrderItems are keyed by (order_id, product_id), so they don't
//! fit the single-id [`Record`] shape; they are fetched through
//! [`crate::pool::Database::order_items`], which runs
//! [`SELECT_ITEMS_BY_ORDER`] and maps rows with [`order_item_from_row`].

use shopfront_core::{Order, OrderItem, OrderStatus};

use crate::record::{like_pattern, Record};
use crate::row::{Row, SqlValue};

const SELECT_BY_ID: &str = "SELECT order_id, user_id, total_amount, status, \
     order_date, updated_at FROM Orders WHERE order_id = ?1";

const INSERT: &str = "INSERT INTO Orders (user_id, total_amount, status, \
     order_date, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";

const UPDATE: &str = "UPDATE Orders SET user_id = ?2, total_amount = ?3, \
     status = ?4, updated_at = ?5 WHERE order_id = ?1";

const DELETE: &str = "DELETE FROM Orders WHERE order_id = ?1";

const SEARCH: &str = "SELECT order_id, user_id, total_amount, status, \
     order_date, updated_at FROM Orders WHERE lower(status) LIKE ?1 ORDER BY order_id";

/// Line items of one order, in insertion order.
pub const SELECT_ITEMS_BY_ORDER: &str =
    "SELECT order_id, product_id, quantity, unit_price FROM OrderItems \
     WHERE order_id = ?1 ORDER BY product_id";

impl Record for Order {
    const TABLE: &'static str = "Orders";

    fn id(&self) -> i64 {
        self.id
    }

    fn with_id(&self, id: i64) -> Self {
        Order { id, ..self.clone() }
    }

    fn from_row(row: &Row) -> Option<Self> {
        if row.is_empty() {
            return None;
        }

        Some(Order {
            id: row.integer("order_id"),
            user_id: row.integer("user_id"),
            total_amount: row.decimal("total_amount"),
            status: OrderStatus::parse(&row.text("status").unwrap_or_default()),
            order_date: row.timestamp("order_date"),
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
                SqlValue::from(self.user_id),
                SqlValue::from(self.total_amount),
                SqlValue::from(self.status.as_str()),
                SqlValue::from(self.order_date),
                SqlValue::from(self.updated_at),
            ],
        )
    }

    fn update_statement(&self) -> (&'static str, Vec<SqlValue>) {
        (
            UPDATE,
            vec![
                SqlValue::from(self.id),
                SqlValue::from(self.user_id),
                SqlValue::from(self.total_amount),
                SqlValue::from(self.status.as_str()),
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

/// Maps one OrderItems row; `None` for an empty row.
pub fn order_item_from_row(row: &Row) -> Option<OrderItem> {
    if row.is_empty() {
        return None;
    }

    Some(OrderItem {
        order_id: row.integer("order_id"),
        product_id: row.integer("product_id"),
        quantity: row.integer("quantity"),
        unit_price: row.decimal("unit_price"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_row_parses_status() {
        let mut columns = HashMap::new();
        columns.insert("order_id".to_string(), SqlValue::Integer(10));
        columns.insert("user_id".to_string(), SqlValue::Integer(4));
        columns.insert("total_amount".to_string(), SqlValue::Real(29.97));
        columns.insert("status".to_string(), SqlValue::Text("shipped".into()));

        let order = Order::from_row(&Row::from_columns(columns)).expect("order");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert!(!order.is_cancellable());
    }

    #[test]
    fn test_unknown_status_falls_back_to_pending() {
        let mut columns = HashMap::new();
        columns.insert("order_id".to_string(), SqlValue::Integer(10));
        columns.insert("status".to_string(), SqlValue::Text("teleported".into()));

        let order = Order::from_row(&Row::from_columns(columns)).expect("order");
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_item_from_row() {
        let mut columns = HashMap::new();
        columns.insert("order_id".to_string(), SqlValue::Integer(10));
        columns.insert("product_id".to_string(), SqlValue::Integer(7));
        columns.insert("quantity".to_string(), SqlValue::Integer(3));
        columns.insert("unit_price".to_string(), SqlValue::Real(9.99));

        let item = order_item_from_row(&Row::from_columns(columns)).expect("item");
        assert_eq!(item.quantity, 3);
        assert!((item.line_total() - 29.97).abs() < 1e-9);

        assert_eq!(order_item_from_row(&Row::default()), None);
    }

    #[test]
    fn test_statement_parameter_counts() {
        let order = Order::new(4, 29.97);
        let (insert, params) = order.insert_statement();
        assert_eq!(params.len(), insert.matches('?').count());

        let (update, params) = order.update_statement();
        assert_eq!(params.len(), update.matches('?').count());
    }
}
