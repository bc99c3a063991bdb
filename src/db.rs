use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::account::database::{PostgresStore, SqliteStore};
use crate::account::storage::Storage;
use crate::config::Config;
use crate::error::CustomError;

/// Opens a pool for `config.database_url` and wraps it in the matching store.
///
/// The table is not created here; call [`Storage::init`] afterwards.
pub async fn connect(config: &Config) -> Result<Arc<dyn Storage>, CustomError> {
    let url = config.database_url.as_str();
    let scheme = url.split(':').next().unwrap_or_default();

    match scheme {
        "postgres" | "postgresql" => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .idle_timeout(Duration::from_secs(30))
                .connect(url)
                .await
                .map_err(CustomError::ConnectionError)?;
            info!(backend = "postgres", "database connected");
            Ok(Arc::new(PostgresStore::new(pool)))
        }
        "sqlite" => {
            let options = if is_in_memory(url) {
                // Every connection to `:memory:` opens its own database, and the
                // database is dropped with its last connection.
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new().max_connections(config.max_connections)
            };
            let pool = options
                .connect(url)
                .await
                .map_err(CustomError::ConnectionError)?;
            info!(backend = "sqlite", "database connected");
            Ok(Arc::new(SqliteStore::new(pool)))
        }
        other => Err(CustomError::UnsupportedDatabase(other.to_string())),
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
