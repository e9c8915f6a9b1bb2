//! # Repository Module
//!
//! Database repository implementations for Bistro.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI / OrderEngine                                                     │
//! │       │                                                                 │
//! │       │  db.menu().find_by_name("Naan")                                │
//! │       ▼                                                                 │
//! │  MenuRepository                                                        │
//! │  ├── list_items / find_by_name / find_by_id   (MenuCatalog)            │
//! │  └── insert / insert_all / update_price       (seeding)                │
//! │                                                                         │
//! │  OrderRepository   get_details, get_status                             │
//! │  LedgerRepository  history                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories only read, apart from menu seeding. Multi-table writes live
//! in [`crate::engine`] where they share one transaction.

pub mod ledger;
pub mod menu;
pub mod order;
