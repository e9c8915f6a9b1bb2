//! # Order Repository
//!
//! Read-only lookups of orders and everything recorded against them.
//! All writes go through [`OrderEngine`](crate::engine::OrderEngine).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bistro_core::{
    CancellationRecord, Order, OrderDetails, OrderLine, OrderStatus, RefundRecord,
    TransactionRecord,
};

/// Repository for order lookups.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order row by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT
                id, customer_name, phone, delivery_address,
                total_amount, status, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets an order's current status.
    pub async fn get_status(&self, id: i64) -> DbResult<Option<OrderStatus>> {
        let status: Option<OrderStatus> =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(status)
    }

    /// Gets the lines of an order, in item id order.
    pub async fn get_lines(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT order_id, item_id, quantity, unit_price
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY item_id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Gets an order with its lines and every ledger record that refers to it.
    ///
    /// ## Returns
    /// * `Ok(None)` - No order with that id
    /// * `Ok(Some(details))` - `cancellation` and `refund` are set iff the
    ///   order is cancelled
    pub async fn get_details(&self, id: i64) -> DbResult<Option<OrderDetails>> {
        debug!(order_id = id, "Loading order details");

        let Some(order) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let lines = self.get_lines(id).await?;

        let transaction = sqlx::query_as::<_, TransactionRecord>(
            "SELECT id, order_id, amount, recorded_at FROM transactions WHERE order_id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let cancellation = sqlx::query_as::<_, CancellationRecord>(
            "SELECT order_id, reason, cancelled_at FROM cancelled_orders WHERE order_id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let refund = sqlx::query_as::<_, RefundRecord>(
            "SELECT order_id, amount, reason, refunded_at FROM refunds WHERE order_id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(Some(OrderDetails {
            order,
            lines,
            transaction,
            cancellation,
            refund,
        }))
    }

    /// Counts orders, optionally only those in `status`.
    pub async fn count(&self, status: Option<OrderStatus>) -> DbResult<i64> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE status = ?1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM orders")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }
}
