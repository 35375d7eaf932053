//! Database initialization and access layer
//!
//! SQLite via sqlx. The database file lives inside the resolved root folder
//! and is created on first run with the full schema; schema creation is
//! idempotent so startup is safe against an existing database.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

pub mod items;
pub mod settings;
pub mod users;

/// Initialize database connection pool and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Wait briefly on lock contention instead of failing immediately
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent, safe to call on every startup)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_settings_table(pool).await?;
    create_users_table(pool).await?;
    create_items_table(pool).await?;
    Ok(())
}

/// Key-value settings (token secret, future tunables)
async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            guid TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            password_salt TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'admin',
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Content items.
///
/// The UNIQUE constraint on slug is the store-level backstop for concurrent
/// same-title creations: the check-then-write slug resolution has a race
/// window, and writers retry on a constraint violation rather than trusting
/// the pre-check alone.
async fn create_items_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            guid TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            images TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER NOT NULL,
            payload TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_created_at ON items (created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_database_creates_file_and_schema() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let db_path = dir.path().join("gourmet.db");

        let pool = init_database(&db_path).await.expect("init");
        assert!(db_path.exists());

        // Schema is present
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .expect("list tables");
        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"items"));
        assert!(names.contains(&"settings"));
        assert!(names.contains(&"users"));
    }

    #[tokio::test]
    async fn test_init_database_is_idempotent() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let db_path = dir.path().join("gourmet.db");

        let pool = init_database(&db_path).await.expect("first init");
        sqlx::query("INSERT INTO settings (key, value) VALUES ('probe', 'kept')")
            .execute(&pool)
            .await
            .expect("insert");
        pool.close().await;

        // Reopening must not wipe existing data
        let pool = init_database(&db_path).await.expect("second init");
        let (value,): (String,) =
            sqlx::query_as("SELECT value FROM settings WHERE key = 'probe'")
                .fetch_one(&pool)
                .await
                .expect("select");
        assert_eq!(value, "kept");
    }
}
