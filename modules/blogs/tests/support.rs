#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)] // Support module provides utilities that may not all be used

//! Shared helpers for `blogs` integration tests.

use std::sync::Arc;

use blogs::domain::service::BlogsService;
use blogs::infra::storage::db::connect;
use blogs::infra::storage::migrations::Migrator;
use blogs::infra::storage::sea_orm_repo::SeaOrmBlogsRepository;
use blogs::{DatabaseConfig, SeedConfig, SeedOutcome};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use sql_capture::TraceFile;

fn inmem_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_owned(),
        ..DatabaseConfig::default()
    }
}

/// Fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    inmem_db_with_trace(None).await
}

/// Same as [`inmem_db`], also appending captured SQL to `trace`.
pub async fn inmem_db_with_trace(trace: Option<Arc<TraceFile>>) -> DatabaseConnection {
    let db = connect(&inmem_config(), trace)
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// In-memory database without the schema.
pub async fn bare_inmem_db() -> DatabaseConnection {
    connect(&inmem_config(), None)
        .await
        .expect("Failed to connect to in-memory database")
}

pub fn service(db: &DatabaseConnection) -> BlogsService<SeaOrmBlogsRepository> {
    BlogsService::new(SeaOrmBlogsRepository::new(db.clone()))
}

/// Migrated database holding the default blog and article.
pub async fn seeded_db() -> (DatabaseConnection, SeedOutcome) {
    let db = inmem_db().await;
    let outcome = service(&db)
        .seed(&SeedConfig::default())
        .await
        .expect("Failed to seed");
    (db, outcome)
}
