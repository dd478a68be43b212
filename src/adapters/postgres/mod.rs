//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresPollRepository` - Transactional poll + options writes
//! - `PostgresPollReader` - Listings and `get_poll_results`
//! - `PostgresVoteRepository` - Vote inserts and `has_user_voted_on_poll`

mod poll_reader;
mod poll_repository;
mod vote_repository;

pub use poll_reader::PostgresPollReader;
pub use poll_repository::PostgresPollRepository;
pub use vote_repository::PostgresVoteRepository;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;

use crate::config::DatabaseConfig;

/// Open a connection pool sized and timed by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// Apply the SQL files in `dir` (normally `migrations/`) in order.
pub async fn run_migrations(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await
}
