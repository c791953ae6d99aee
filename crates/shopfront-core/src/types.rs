//! # Entity Types
//!
//! Storefront entity types shared by the database layer and callers.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Entity Types                             │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐     │
//! │  │    Product    │   │     Order     │   │     User      │     │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │     │
//! │  │  id (i64)     │   │  id (i64)     │   │  id (i64)     │     │
//! │  │  name         │   │  user_id (FK) │   │  username     │     │
//! │  │  price        │   │  status       │   │  role         │     │
//! │  │  stock_qty    │   │  total_amount │   │  email        │     │
//! │  └───────────────┘   └───────────────┘   └───────────────┘     │
//! │                                                                 │
//! │  ┌───────────────┐   ┌───────────────┐                         │
//! │  │   Category    │   │   OrderItem   │                         │
//! │  │  ───────────  │   │  ───────────  │                         │
//! │  │  id (i64)     │   │  order_id     │  composite key:         │
//! │  │  name         │   │  product_id   │  (order_id,             │
//! │  └───────────────┘   │  quantity     │   product_id)           │
//! │                      └───────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every top-level entity has a database-generated integer id. An id of 0
//! means "not yet persisted" - inserts return the generated key.
//!
//! ## Nullability
//! Optional columns map to `Option`; NOT NULL text columns fall back to an
//! empty string when the row mapper hands us a null (total coercion, the
//! mapper never fails).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, not yet processed.
    #[default]
    Pending,
    /// Payment confirmed, being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before shipment.
    Cancelled,
}

impl OrderStatus {
    /// The database representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its database representation.
    ///
    /// Total: unknown or mis-cased input falls back to `Pending` rather
    /// than failing, matching the row mapper's coercion discipline.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

// =============================================================================
// User Role
// =============================================================================

/// Access role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Back-office administrator.
    Admin,
    /// Regular storefront customer.
    #[default]
    Customer,
}

impl UserRole {
    /// The database representation of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Customer => "customer",
        }
    }

    /// Parses a role; unknown input falls back to `Customer`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            _ => UserRole::Customer,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Database-generated id (0 until persisted).
    pub id: i64,

    /// Display name shown in listings and search results.
    pub name: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Unit price.
    pub price: f64,

    /// Owning category (0 when uncategorized).
    pub category_id: i64,

    /// Units currently in stock.
    pub stock_quantity: i64,

    /// Optional image location.
    pub image_url: Option<String>,

    /// When the product was created.
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates a new, not-yet-persisted product with timestamps stamped now.
    pub fn new(name: impl Into<String>, price: f64, category_id: i64, stock_quantity: i64) -> Self {
        let now = Utc::now();
        Product {
            id: 0,
            name: name.into(),
            description: None,
            price,
            category_id,
            stock_quantity,
            image_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Checks whether the requested quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock_quantity >= quantity
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Database-generated id (0 until persisted).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,
}

impl Category {
    /// Creates a new, not-yet-persisted category.
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: 0,
            name: name.into(),
            description: None,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Database-generated id (0 until persisted).
    pub id: i64,

    /// The customer who placed the order.
    pub user_id: i64,

    /// Grand total at the time of placement.
    pub total_amount: f64,

    /// Lifecycle status.
    pub status: OrderStatus,

    /// When the order was placed.
    pub order_date: Option<DateTime<Utc>>,

    /// When the order was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a new pending order stamped now.
    pub fn new(user_id: i64, total_amount: f64) -> Self {
        let now = Utc::now();
        Order {
            id: 0,
            user_id,
            total_amount,
            status: OrderStatus::Pending,
            order_date: Some(now),
            updated_at: Some(now),
        }
    }

    /// Whether the order can still be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Processing)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item of an order.
///
/// Keyed by (order_id, product_id); the unit price is frozen at the time
/// the order was placed, so later product price changes don't rewrite
/// order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price at the time of ordering (frozen).
    pub unit_price: f64,
}

impl OrderItem {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

// =============================================================================
// User
// =============================================================================

/// A storefront user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Database-generated id (0 until persisted).
    pub id: i64,

    /// Unique login name.
    pub username: String,

    /// Unique email address.
    pub email: String,

    /// Password hash as produced by the authentication layer; this crate
    /// never hashes or verifies, it only stores the opaque value.
    pub password_hash: String,

    /// Access role.
    pub role: UserRole,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new, not-yet-persisted customer account stamped now.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        User {
            id: 0,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: UserRole::Customer,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Whether this account may use the admin tool.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_order_status_parse_is_total() {
        assert_eq!(OrderStatus::parse("SHIPPED"), OrderStatus::Shipped);
        assert_eq!(OrderStatus::parse("  pending "), OrderStatus::Pending);
        assert_eq!(OrderStatus::parse("garbage"), OrderStatus::Pending);
        assert_eq!(OrderStatus::parse(""), OrderStatus::Pending);
    }

    #[test]
    fn test_user_role_parse_is_total() {
        assert_eq!(UserRole::parse("Admin"), UserRole::Admin);
        assert_eq!(UserRole::parse("customer"), UserRole::Customer);
        assert_eq!(UserRole::parse("superuser"), UserRole::Customer);
    }

    #[test]
    fn test_product_can_fulfill() {
        let product = Product::new("Widget", 9.99, 1, 5);
        assert!(product.can_fulfill(5));
        assert!(!product.can_fulfill(6));
        assert!(!product.can_fulfill(0));
    }

    #[test]
    fn test_order_is_cancellable() {
        let mut order = Order::new(1, 25.0);
        assert!(order.is_cancellable());

        order.status = OrderStatus::Shipped;
        assert!(!order.is_cancellable());
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            order_id: 1,
            product_id: 2,
            quantity: 3,
            unit_price: 9.99,
        };
        assert!((item.line_total() - 29.97).abs() < 1e-9);
    }
}
