//! # Order Engine
//!
//! Every multi-table write in Bistro, each as one atomic unit of work.
//!
//! ## create_order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. validate customer fields + cart          ─┐                         │
//! │  2. resolve every name via MenuCatalog        ├─ no writes; first       │
//! │  3. price lines, checked Σ                   ─┘  unknown name reported  │
//! │                                                                         │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐  │
//! │  4. INSERT orders (status = pending, total_amount)                  │  │
//! │  5. INSERT transactions (order_id, amount = total)   exactly one    │  │
//! │  6. INSERT order_lines × n (unit_price frozen)                      │  │
//! │  COMMIT ──── any failure: ROLLBACK, log detail, ProcessingFailed ───┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## cancel_order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                 │
//! │  SELECT status, total_amount       none        → OrderNotFound         │
//! │                                    not pending → InvalidTransition     │
//! │  UPDATE orders SET status = 'cancelled'                                │
//! │         WHERE id = ? AND status = 'pending'    (rows_affected == 1)    │
//! │  INSERT cancelled_orders (order_id, reason)                            │
//! │  INSERT refunds (order_id, amount = frozen total, reason)              │
//! │  COMMIT ──── any failure: ROLLBACK, log detail, CancellationFailed     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejections (validation, unknown item, unknown order, illegal transition)
//! never leave a row behind. Store failures are logged with their detail and
//! reported to the caller only as a generic, retryable error.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use crate::repository::menu::MenuCatalog;
use bistro_core::cart::{Cart, LineItem, PricedCart};
use bistro_core::validation::{
    validate_customer_name, validate_delivery_address, validate_phone, validate_reason,
};
use bistro_core::{
    CancellationReceipt, MenuItem, Money, OrderDetails, OrderError, OrderReceipt, OrderResult,
    OrderStatus, TransactionHistory,
};

/// Outcome of checking an order's status inside a transaction.
enum Transition {
    Allowed { total: Money },
    Rejected(OrderError),
}

/// Places, cancels and completes orders.
///
/// The catalog is injected so tests can substitute one that disagrees with
/// the database.
///
/// ## Example
/// ```rust,ignore
/// let engine = OrderEngine::new(db.clone(), db.menu());
/// let receipt = engine.create_order("Asha", "12 MG Road", "9876543210", &cart).await?;
/// engine.cancel_order(receipt.order_id, "customer request").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderEngine<C: MenuCatalog> {
    db: Database,
    catalog: C,
}

impl<C: MenuCatalog> OrderEngine<C> {
    pub fn new(db: Database, catalog: C) -> Self {
        OrderEngine { db, catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // =========================================================================
    // Read Paths
    // =========================================================================

    /// Lists the menu.
    pub async fn menu(&self) -> OrderResult<Vec<MenuItem>> {
        self.catalog
            .list_items()
            .await
            .map_err(|e| store_failure("menu", e, OrderError::LookupFailed))
    }

    /// Resolves and prices a cart without writing anything.
    ///
    /// Entries are resolved in cart order; the first name missing from the
    /// menu is reported as `ItemNotFound`.
    pub async fn resolve(&self, cart: &Cart) -> OrderResult<PricedCart> {
        cart.validate()?;

        let mut lines = Vec::with_capacity(cart.len());
        for entry in cart.entries() {
            let item = self
                .catalog
                .find_by_name(&entry.name)
                .await
                .map_err(|e| store_failure("resolve", e, OrderError::LookupFailed))?
                .ok_or_else(|| OrderError::ItemNotFound(entry.name.clone()))?;

            lines.push(LineItem::price(&item, entry.quantity)?);
        }

        Ok(PricedCart::from_lines(lines)?)
    }

    /// Gets an order with its lines and ledger records.
    pub async fn get_order(&self, order_id: i64) -> OrderResult<Option<OrderDetails>> {
        self.db
            .orders()
            .get_details(order_id)
            .await
            .map_err(|e| store_failure("get_order", e, OrderError::LookupFailed))
    }

    /// Newest-first history of every recorded transaction.
    pub async fn transaction_history(&self) -> OrderResult<TransactionHistory> {
        self.db
            .ledger()
            .history()
            .await
            .map_err(|e| store_failure("transaction_history", e, OrderError::LookupFailed))
    }

    // =========================================================================
    // create_order
    // =========================================================================

    /// Places an order for `cart`.
    ///
    /// ## Returns
    /// * `Ok(receipt)` - order id, frozen total, priced lines
    /// * `Err(Validation | ItemNotFound)` - nothing was written
    /// * `Err(ProcessingFailed)` - the store failed; nothing was kept
    pub async fn create_order(
        &self,
        customer_name: &str,
        delivery_address: &str,
        phone: &str,
        cart: &Cart,
    ) -> OrderResult<OrderReceipt> {
        validate_customer_name(customer_name)?;
        validate_delivery_address(delivery_address)?;
        validate_phone(phone)?;

        let priced = match self.resolve(cart).await {
            Ok(priced) => priced,
            Err(OrderError::LookupFailed) => return Err(OrderError::ProcessingFailed),
            Err(err) => return Err(err),
        };

        debug!(
            lines = priced.lines().len(),
            total = %priced.total(),
            "Cart resolved, writing order"
        );

        let customer = NewOrder {
            customer_name: customer_name.trim(),
            delivery_address: delivery_address.trim(),
            phone: phone.trim(),
        };

        let mut tx = self
            .begin()
            .await
            .map_err(|e| store_failure("create_order", e, OrderError::ProcessingFailed))?;

        let written = insert_order(&mut *tx, &customer, &priced, Utc::now()).await;
        let order_id = match written {
            Ok(order_id) => order_id,
            Err(err) => {
                rollback(tx, "create_order").await;
                return Err(store_failure("create_order", err, OrderError::ProcessingFailed));
            }
        };

        tx.commit()
            .await
            .map_err(|e| store_failure("create_order", e.into(), OrderError::ProcessingFailed))?;

        info!(order_id, total = %priced.total(), "Order created");

        let total = priced.total();
        Ok(OrderReceipt {
            order_id,
            total,
            lines: priced.into_lines(),
        })
    }

    // =========================================================================
    // cancel_order
    // =========================================================================

    /// Cancels a pending order and records its refund.
    ///
    /// ## Returns
    /// * `Ok(receipt)` - refund amount equals the order's frozen total
    /// * `Err(OrderNotFound | InvalidTransition | Validation)` - nothing written
    /// * `Err(CancellationFailed)` - the store failed; nothing was kept
    pub async fn cancel_order(
        &self,
        order_id: i64,
        reason: &str,
    ) -> OrderResult<CancellationReceipt> {
        validate_reason(reason)?;
        let reason = reason.trim();

        let mut tx = self
            .begin()
            .await
            .map_err(|e| store_failure("cancel_order", e, OrderError::CancellationFailed))?;

        let written = transition(&mut *tx, order_id, OrderStatus::Cancelled).await;

        let total = match written {
            Ok(Transition::Allowed { total }) => total,
            Ok(Transition::Rejected(rejection)) => {
                rollback(tx, "cancel_order").await;
                return Err(rejection);
            }
            Err(err) => {
                rollback(tx, "cancel_order").await;
                return Err(store_failure("cancel_order", err, OrderError::CancellationFailed));
            }
        };

        let recorded = record_cancellation(&mut *tx, order_id, total, reason, Utc::now()).await;
        if let Err(err) = recorded {
            rollback(tx, "cancel_order").await;
            return Err(store_failure("cancel_order", err, OrderError::CancellationFailed));
        }

        tx.commit()
            .await
            .map_err(|e| store_failure("cancel_order", e.into(), OrderError::CancellationFailed))?;

        info!(order_id, refund = %total, "Order cancelled");

        Ok(CancellationReceipt {
            order_id,
            refund_amount: total,
        })
    }

    // =========================================================================
    // complete_order
    // =========================================================================

    /// Marks a pending order as delivered.
    pub async fn complete_order(&self, order_id: i64) -> OrderResult<()> {
        let mut tx = self
            .begin()
            .await
            .map_err(|e| store_failure("complete_order", e, OrderError::CompletionFailed))?;

        let written = transition(&mut *tx, order_id, OrderStatus::Completed).await;
        match written {
            Ok(Transition::Allowed { .. }) => {}
            Ok(Transition::Rejected(rejection)) => {
                rollback(tx, "complete_order").await;
                return Err(rejection);
            }
            Err(err) => {
                rollback(tx, "complete_order").await;
                return Err(store_failure("complete_order", err, OrderError::CompletionFailed));
            }
        }

        tx.commit()
            .await
            .map_err(|e| store_failure("complete_order", e.into(), OrderError::CompletionFailed))?;

        info!(order_id, "Order completed");
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.db
            .pool()
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Moves a pending order to `next` inside `conn`'s transaction.
///
/// The update is conditional on the row still being pending, so two
/// concurrent transitions cannot both succeed.
async fn transition(
    conn: &mut SqliteConnection,
    order_id: i64,
    next: OrderStatus,
) -> DbResult<Transition> {
    let row: Option<(OrderStatus, Money)> =
        sqlx::query_as("SELECT status, total_amount FROM orders WHERE id = ?1")
            .bind(order_id)
            .fetch_optional(&mut *conn)
            .await?;

    let Some((current, total)) = row else {
        warn!(order_id, "Order not found");
        return Ok(Transition::Rejected(OrderError::OrderNotFound(order_id)));
    };

    if !current.can_transition_to(next) {
        warn!(order_id, %current, %next, "Rejected status change");
        return Ok(Transition::Rejected(OrderError::InvalidTransition {
            order_id,
            current,
        }));
    }

    let result = sqlx::query(
        r#"
        UPDATE orders SET status = ?2, updated_at = ?3
        WHERE id = ?1 AND status = 'pending'
        "#,
    )
    .bind(order_id)
    .bind(next)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        let current: OrderStatus =
            sqlx::query_scalar("SELECT status FROM orders WHERE id = ?1")
                .bind(order_id)
                .fetch_one(&mut *conn)
                .await?;
        warn!(order_id, %current, "Order changed state concurrently");
        return Ok(Transition::Rejected(OrderError::InvalidTransition {
            order_id,
            current,
        }));
    }

    Ok(Transition::Allowed { total })
}

struct NewOrder<'a> {
    customer_name: &'a str,
    delivery_address: &'a str,
    phone: &'a str,
}

/// Writes the order row, its ledger entry and its lines. Returns the order id.
async fn insert_order(
    conn: &mut SqliteConnection,
    customer: &NewOrder<'_>,
    priced: &PricedCart,
    now: DateTime<Utc>,
) -> DbResult<i64> {
    let order_id = sqlx::query(
        r#"
        INSERT INTO orders (
            customer_name, phone, delivery_address,
            total_amount, status, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
    )
    .bind(customer.customer_name)
    .bind(customer.phone)
    .bind(customer.delivery_address)
    .bind(priced.total())
    .bind(OrderStatus::Pending)
    .bind(now)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    sqlx::query("INSERT INTO transactions (order_id, amount, recorded_at) VALUES (?1, ?2, ?3)")
        .bind(order_id)
        .bind(priced.total())
        .bind(now)
        .execute(&mut *conn)
        .await?;

    for line in priced.lines() {
        debug!(order_id, item_id = line.item_id, quantity = line.quantity, "Inserting order line");

        sqlx::query(
            r#"
            INSERT INTO order_lines (order_id, item_id, quantity, unit_price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order_id)
        .bind(line.item_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .execute(&mut *conn)
        .await?;
    }

    Ok(order_id)
}

async fn record_cancellation(
    conn: &mut SqliteConnection,
    order_id: i64,
    total: Money,
    reason: &str,
    now: DateTime<Utc>,
) -> DbResult<()> {
    sqlx::query(
        "INSERT INTO cancelled_orders (order_id, reason, cancelled_at) VALUES (?1, ?2, ?3)",
    )
    .bind(order_id)
    .bind(reason)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "INSERT INTO refunds (order_id, amount, reason, refunded_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(order_id)
    .bind(total)
    .bind(reason)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn rollback(tx: Transaction<'static, Sqlite>, operation: &'static str) {
    if let Err(e) = tx.rollback().await {
        error!(operation, error = %e, "Rollback failed");
    }
}

/// Logs the store detail and returns the caller-facing error in its place.
fn store_failure(operation: &'static str, err: DbError, surfaced: OrderError) -> OrderError {
    error!(operation, error = %err, "Database operation failed");
    surfaced
}

// =============================================================================
// Unit Tests
// =============================================================================
