//! # bistro-cli: Interactive Ordering Assistant
//!
//! Text front end over [`bistro_db::OrderEngine`].
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs    init_tracing, AppConfig::from_env, Database::new            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  app.rs     Session: prompt loop, dispatch to the engine               │
//! │     │                                                                   │
//! │     ├── input.rs    menu choices, "Item X Qty" carts, order ids        │
//! │     ├── display.rs  menu, receipts, history, order status              │
//! │     └── config.rs   BISTRO_* variables, currency formatting            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod input;

pub use app::Session;
pub use config::{AppConfig, ConfigError};
pub use error::CliError;

use tracing_subscriber::EnvFilter;

/// Installs the tracing subscriber.
///
/// Logs go to stderr so they never interleave with prompts on stdout.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,bistro=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
