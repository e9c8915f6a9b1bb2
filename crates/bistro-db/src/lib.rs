//! # bistro-db: Database Layer for Bistro
//!
//! SQLite storage plus the order transaction engine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Data Flow                                 │
//! │                                                                         │
//! │  CLI option "2. Create Order"                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  OrderEngine  │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (engine.rs)  │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ MenuRepo      │    │              │  │   │
//! │  │   │ create_order  │───►│ OrderRepo     │    │ 001_init.sql │  │   │
//! │  │   │ cancel_order  │    │ LedgerRepo    │    │              │  │   │
//! │  │   │ complete      │    └───────┬───────┘    └──────────────┘  │   │
//! │  │   └───────┬───────┘            │                               │   │
//! │  │           └──────────┬─────────┘                               │   │
//! │  │                      ▼                                         │   │
//! │  │              Database (pool.rs)                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (bistro.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Menu catalog, order lookup, transaction ledger
//! - [`engine`] - Atomic create / cancel / complete
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_core::Cart;
//! use bistro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bistro.db")).await?;
//! let engine = db.engine();
//!
//! let cart = Cart::from_pairs([("Butter Chicken", 2), ("Naan", 3)])?;
//! let receipt = engine.create_order("Asha", "12 MG Road", "9876543210", &cart).await?;
//! println!("order {} total {}", receipt.order_id, receipt.total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::OrderEngine;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::ledger::LedgerRepository;
pub use repository::menu::{MenuCatalog, MenuRepository};
pub use repository::order::OrderRepository;
