//! # CLI Error Type
//!
//! Failures that end the session. Order-level failures (unknown item,
//! invalid transition, a rolled-back write) are printed and the loop goes
//! on; only these stop it.

use bistro_db::DbError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Opening or migrating the database failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Reading the terminal or writing to it failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
