//! SQLite access. One function per query the pages need.

use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub mod comment;
pub mod post;

/// Opens the pool (creating the database file if needed) and brings the
/// schema up to date.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    tracing::debug!(url = %config.url, "database ready");

    Ok(pool)
}

/// Timestamps are stored as fixed-width RFC 3339 text so that ordering by the
/// column is chronological.
fn timestamp_column(at: chrono::DateTime<chrono::Utc>) -> String {
    at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
