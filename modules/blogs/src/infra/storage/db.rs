use std::fmt::Display;
use std::sync::Arc;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use sql_capture::TraceFile;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::error::DomainError;

/// Open a connection that reports every executed statement to `sql-capture`.
///
/// # Errors
///
/// Returns the driver error when the database cannot be reached.
pub async fn connect(
    cfg: &DatabaseConfig,
    trace: Option<Arc<TraceFile>>,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options.sqlx_logging(cfg.sqlx_logging);

    if is_in_memory_sqlite(&cfg.url) {
        // every pooled connection would otherwise open its own empty database
        options.max_connections(1).min_connections(1);
    } else if let Some(max) = cfg.max_connections {
        options.max_connections(max);
    }

    let mut db = Database::connect(options).await?;
    db.set_metric_callback(sql_capture::metric_recorder(trace));

    info!(backend = ?db.get_database_backend(), "database connected");
    Ok(db)
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

/// Wrap a driver error as [`DomainError::Database`].
#[must_use]
pub fn db_err(e: impl Display) -> DomainError {
    DomainError::database(e.to_string())
}
