//! Database migration runner for the DRE record tables.
//!
//! Usage:
//!   migrator up      - Create the record tables
//!   migrator down    - Drop them again
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-run migrations
//!
//! The connection string comes from `DATABASE_URL`.

use dre_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // sea-orm-migration sets up its own tracing
    cli::run_cli(Migrator).await;
}
