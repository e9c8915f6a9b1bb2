//! # Bistro
//!
//! Interactive food-ordering assistant.
//!
//! ```bash
//! cargo run -p bistro-db --bin seed        # once, to load the sample menu
//! cargo run -p bistro-cli --bin bistro
//! ```

use std::io;

use bistro_cli::{init_tracing, AppConfig, CliError, Session};
use bistro_db::Database;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();

    let config = AppConfig::from_env()?;
    info!(path = %config.db_path.display(), "Starting Bistro");

    let db = Database::new(config.db_config()).await?;
    let engine = db.engine();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = Session::new(&engine, &config, stdin.lock(), stdout.lock())
        .run()
        .await;

    db.close().await;
    info!("Database connection closed");
    result
}
