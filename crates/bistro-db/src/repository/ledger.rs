//! # Ledger Repository
//!
//! The transaction history report.
//!
//! ## One Aggregation Join
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transactions t ──► orders o ──► order_lines ol ──► menu_items m       │
//! │                                                                         │
//! │  GROUP BY t.id                                                         │
//! │  items = GROUP_CONCAT("Butter Chicken (250.00)", ", ")                 │
//! │  ORDER BY t.recorded_at DESC, t.id DESC                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The price shown beside each name is the line's frozen `unit_price`, so
//! the report always agrees with the order total.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use bistro_core::{TransactionHistory, TransactionView};

/// Read-only access to the transaction ledger.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Newest transaction first, ties broken by transaction id.
    pub async fn history(&self) -> DbResult<TransactionHistory> {
        let views = sqlx::query_as::<_, TransactionView>(
            r#"
            SELECT
                t.id          AS transaction_id,
                t.order_id    AS order_id,
                t.amount      AS amount,
                t.recorded_at AS recorded_at,
                o.status      AS status,
                GROUP_CONCAT(
                    printf('%s (%d.%02d)', m.name, ol.unit_price / 100, ol.unit_price % 100),
                    ', '
                )             AS items
            FROM transactions t
            INNER JOIN orders o       ON o.id = t.order_id
            INNER JOIN order_lines ol ON ol.order_id = o.id
            INNER JOIN menu_items m   ON m.id = ol.item_id
            GROUP BY t.id
            ORDER BY t.recorded_at DESC, t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = views.len(), "Loaded transaction history");
        Ok(TransactionHistory::from_views(views))
    }

    /// Number of ledger entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
