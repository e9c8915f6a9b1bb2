//! # Validation Module
//!
//! Input validation for carts, customer details and cancellation requests.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: CLI                                                          │
//! │  └── "Item X Qty" parsing, integer parsing                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by Cart and OrderEngine)                 │
//! │  └── positive quantities, non-empty fields, length limits              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  └── NOT NULL, CHECK (quantity > 0), UNIQUE, FOREIGN KEY               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 20;
const MAX_ADDRESS_LEN: usize = 300;
const MAX_REASON_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

fn require_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a menu item name as typed into a cart.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    require_text("item name", name, MAX_NAME_LEN)
}

pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    require_text("customer name", name, MAX_NAME_LEN)
}

pub fn validate_delivery_address(address: &str) -> ValidationResult<()> {
    require_text("delivery address", address, MAX_ADDRESS_LEN)
}

/// Validates a phone number.
///
/// Only presence and length are checked; the format is opaque.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    require_text("phone", phone, MAX_PHONE_LEN)
}

/// Validates a cancellation reason.
pub fn validate_reason(reason: &str) -> ValidationResult<()> {
    require_text("cancellation reason", reason, MAX_REASON_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ```rust
/// use bistro_core::validation::validate_quantity;
///
/// assert!(validate_quantity(3).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-2).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates an order id supplied by the caller.
pub fn validate_order_id(order_id: i64) -> ValidationResult<()> {
    if order_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "order id".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct item fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 1,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
