// SQLite connection setup: create the database file if missing, enable WAL,
// apply the schema.

use crate::db::SCHEMA;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{migrate::MigrateDatabase, Pool, Sqlite};

/// The pipeline is strictly sequential; the pool is capped at a single
/// connection held for the process lifetime.
pub async fn establish_connection(database_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }

    Ok(pool)
}
