//! # Domain Types
//!
//! Core domain types used throughout Bistro.
//!
//! ## Record Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Persisted Records                               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Order      │   │   OrderLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──┼─────────────────┼───│  item_id (FK)   │       │
//! │  │  name (unique)  │   │  id             │◄──│  order_id (FK)  │       │
//! │  │  unit_price     │   │  total_amount   │   │  quantity       │       │
//! │  └─────────────────┘   │  status         │   │  unit_price     │       │
//! │                        └────────┬────────┘   └─────────────────┘       │
//! │                                 │ order_id                              │
//! │          ┌──────────────────────┼──────────────────────┐               │
//! │          ▼                      ▼                      ▼               │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │TransactionRecord│   │CancellationRecord│  │  RefundRecord   │       │
//! │  │  exactly one    │   │  iff Cancelled  │   │  iff Cancelled  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Menu
// =============================================================================

/// An item on the menu. Owned by the catalog; read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    /// Display name; unique and matched case-sensitively.
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub unit_price: Money,
}

/// A menu item that has not been stored yet (seeding, tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: Money,
}

impl NewMenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>, unit_price: Money) -> Self {
        NewMenuItem {
            name: name.into(),
            category: category.into(),
            description: None,
            unit_price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of an order.
///
/// ## State Machine
/// ```text
///              ┌──────────► Completed
///   Pending ───┤
///              └──────────► Cancelled   (+ cancellation & refund records)
///
///   Completed and Cancelled are terminal.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet delivered. The only state that can change.
    Pending,
    /// Delivered.
    Completed,
    /// Cancelled by the customer; a refund has been recorded.
    Cancelled,
}

impl OrderStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub const fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    /// Lowercase name as stored in the `orders.status` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A placed order. Never physically deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    pub delivery_address: String,
    /// Σ unit_price × quantity over the lines, frozen at creation.
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One distinct item in an order.
///
/// `unit_price` is a snapshot of the catalog price when the order was
/// placed, so later menu price changes never alter past orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub order_id: i64,
    pub item_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
}

/// The ledger entry written alongside every order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionRecord {
    pub id: i64,
    pub order_id: i64,
    pub amount: Money,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CancellationRecord {
    pub order_id: i64,
    pub reason: String,
    pub cancelled_at: DateTime<Utc>,
}

/// Refund bookkeeping entry. No money moves; this only records what is owed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RefundRecord {
    pub order_id: i64,
    pub amount: Money,
    pub reason: String,
    pub refunded_at: DateTime<Utc>,
}

/// Everything stored about one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: Order,
    pub lines: Vec<OrderLine>,
    pub transaction: Option<TransactionRecord>,
    pub cancellation: Option<CancellationRecord>,
    pub refund: Option<RefundRecord>,
}

// =============================================================================
// Engine Results
// =============================================================================

/// Returned by a successful `create_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: i64,
    pub total: Money,
    pub lines: Vec<crate::cart::LineItem>,
}

/// Returned by a successful `cancel_order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationReceipt {
    pub order_id: i64,
    /// Amount recorded in the refund ledger (the order's frozen total).
    pub refund_amount: Money,
}

// =============================================================================
// Ledger
// =============================================================================

/// One row of the transaction history report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionView {
    pub transaction_id: i64,
    pub order_id: i64,
    pub amount: Money,
    pub recorded_at: DateTime<Utc>,
    pub status: OrderStatus,
    /// `"Butter Chicken (250.00), Naan (40.00)"`
    pub items: String,
}

/// Result of a history query. An empty ledger is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionHistory {
    Empty,
    Entries(Vec<TransactionView>),
}

impl TransactionHistory {
    pub fn from_views(views: Vec<TransactionView>) -> Self {
        if views.is_empty() {
            TransactionHistory::Empty
        } else {
            TransactionHistory::Entries(views)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TransactionHistory::Empty)
    }

    pub fn entries(&self) -> &[TransactionView] {
        match self {
            TransactionHistory::Empty => &[],
            TransactionHistory::Entries(views) => views,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn test_status_default_and_terminal() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serialization_matches_column_values() {
        for status in [OrderStatus::Pending, OrderStatus::Completed, OrderStatus::Cancelled] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_history_empty_indicator() {
        assert!(TransactionHistory::from_views(Vec::new()).is_empty());
        assert!(TransactionHistory::Empty.entries().is_empty());
    }

    #[test]
    fn test_new_menu_item_from_json() {
        let item: NewMenuItem =
            serde_json::from_str(r#"{"name":"Naan","category":"Breads","unit_price":4000}"#)
                .unwrap();
        assert_eq!(item.unit_price, Money::from_minor(4_000));
        assert!(item.description.is_none());
    }
}
