//! # bistro-core: Pure Business Logic for Bistro
//!
//! Domain types and rules for the ordering assistant, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bistro Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bistro-cli (interactive menu)                  │   │
//! │  │   Show Menu ─► Create Order ─► Cancel Order ─► History         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Order    │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Status   │  │ (minor)   │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             bistro-db (SQLite, OrderEngine, ledger)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (MenuItem, Order, OrderLine, ledger rows)
//! - [`money`] - Fixed-point money in minor units
//! - [`cart`] - Cart merging and line-item pricing
//! - [`error`] - `OrderError` and `ValidationError`
//! - [`validation`] - Input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::cart::{Cart, LineItem, PricedCart};
//! use bistro_core::{MenuItem, Money};
//!
//! let cart = Cart::from_pairs([("Butter Chicken", 2)]).unwrap();
//! cart.validate().unwrap();
//!
//! let butter_chicken = MenuItem {
//!     id: 1,
//!     name: "Butter Chicken".into(),
//!     category: "Mains".into(),
//!     description: None,
//!     unit_price: Money::from_minor(25_000),
//! };
//! let line = LineItem::price(&butter_chicken, 2).unwrap();
//! let priced = PricedCart::from_lines(vec![line]).unwrap();
//! assert_eq!(priced.total().to_string(), "500.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry, LineItem, PricedCart};
pub use error::{OrderError, OrderResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart.
///
/// Guards against typos such as `Naan X 1000` instead of `Naan X 10`.
pub const MAX_ITEM_QUANTITY: i64 = 999;
