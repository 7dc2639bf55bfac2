//! Database layer for DRE structures.
//!
//! This crate provides:
//! - [`PgRecordStore`], the PostgreSQL implementation of the record store
//! - Database migrations

pub mod migration;
pub mod store;

pub use store::PgRecordStore;

use std::time::Duration;

use dre_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}
