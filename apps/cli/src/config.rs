//! # CLI Configuration
//!
//! Loaded once at startup from `BISTRO_*` environment variables, read-only
//! afterwards.
//!
//! | Variable                 | Default        |
//! |--------------------------|----------------|
//! | `BISTRO_DB_PATH`         | `./bistro.db`  |
//! | `BISTRO_CURRENCY_SYMBOL` | `₹`            |
//! | `BISTRO_MAX_CONNECTIONS` | `5`            |

use std::env;
use std::path::PathBuf;

use bistro_core::Money;
use bistro_db::DbConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Prefix for displayed amounts
    pub currency_symbol: String,

    /// Pool size handed to `DbConfig`
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: PathBuf::from("./bistro.db"),
            currency_symbol: "₹".to_string(),
            max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("BISTRO_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(symbol) = lookup("BISTRO_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("BISTRO_MAX_CONNECTIONS") {
            config.max_connections = raw
                .trim()
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("BISTRO_MAX_CONNECTIONS".to_string()))?;
        }

        Ok(config)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.max_connections)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_cli::config::AppConfig;
    /// use bistro_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(62_000)), "₹620.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.major_part().abs(),
            amount.minor_part()
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
