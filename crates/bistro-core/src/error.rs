//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core (this file)                                               │
//! │  ├── ValidationError  - Bad caller input (quantity, empty fields)      │
//! │  └── OrderError       - What the order engine reports to callers       │
//! │                                                                         │
//! │  bistro-db (separate crate)                                            │
//! │  └── DbError          - Store failures; logged, then collapsed into    │
//! │                         OrderError::ProcessingFailed & friends         │
//! │                                                                         │
//! │  Flow: ValidationError → OrderError ← (DbError, detail logged only)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! | Kind        | Variants                                    | Side effects |
//! |-------------|---------------------------------------------|--------------|
//! | Validation  | `Validation`, `ItemNotFound`                | none         |
//! | Not found   | `OrderNotFound`                             | none         |
//! | State       | `InvalidTransition`                         | none         |
//! | Persistence | `ProcessingFailed`, `CancellationFailed`, … | rolled back  |

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Order Error
// =============================================================================

/// Errors returned by the order engine.
///
/// Persistence variants deliberately carry no store detail: the underlying
/// error is logged where it happens and the caller only learns that the
/// unit of work was rolled back and may be retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Caller input failed validation before any lookup or write.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A cart entry names an item that is not on the menu.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Butter Chicken X 2, Dosa X 1
    ///      │
    ///      ▼
    /// resolve "Dosa" → not in menu_items
    ///      │
    ///      ▼
    /// ItemNotFound("Dosa")   (nothing written)
    /// ```
    #[error("Item '{0}' not found in the menu. Please check the item name and try again.")]
    ItemNotFound(String),

    /// No order exists with the given id.
    #[error("Order {0} not found.")]
    OrderNotFound(i64),

    /// The order is not Pending, so it can no longer change state.
    #[error("Cannot change order {order_id}: it is already {current}.")]
    InvalidTransition { order_id: i64, current: OrderStatus },

    /// Order creation failed in the store and was rolled back.
    #[error("Error processing order. Please try again.")]
    ProcessingFailed,

    /// Cancellation failed in the store and was rolled back.
    #[error("Error cancelling order. Please try again.")]
    CancellationFailed,

    /// Completing the order failed in the store and was rolled back.
    #[error("Error completing order. Please try again.")]
    CompletionFailed,

    /// A read path (history, order lookup, menu) failed.
    #[error("Error fetching records. Please try again.")]
    LookupFailed,
}

impl OrderError {
    /// True for errors the caller can fix by changing the request.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            OrderError::Validation(_)
                | OrderError::ItemNotFound(_)
                | OrderError::OrderNotFound(_)
                | OrderError::InvalidTransition { .. }
        )
    }

    /// True when the store failed and the whole unit of work was undone.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::ProcessingFailed
                | OrderError::CancellationFailed
                | OrderError::CompletionFailed
                | OrderError::LookupFailed
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any catalog lookup or write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. an amount with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An amount computation left the representable range.
    #[error("{field} is too large")]
    Overflow { field: String },
}

/// Convenience alias for engine results.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
