//! Settings table access
//!
//! Holds the per-install token signing secret, generated lazily on first
//! use and persisted so issued tokens survive restarts.

use crate::Result;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

const TOKEN_SECRET_KEY: &str = "auth_token_secret";

/// Load the token signing secret, generating and storing one if missing
pub async fn load_token_secret(pool: &SqlitePool) -> Result<String> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(TOKEN_SECRET_KEY)
            .fetch_optional(pool)
            .await?;

    match result {
        Some((value,)) if !value.is_empty() => Ok(value),
        _ => initialize_token_secret(pool).await,
    }
}

/// Generate a fresh random secret and persist it
pub async fn initialize_token_secret(pool: &SqlitePool) -> Result<String> {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    let secret: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

    sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
        .bind(TOKEN_SECRET_KEY)
        .bind(&secret)
        .execute(pool)
        .await?;

    info!("Generated new token signing secret");
    Ok(secret)
}
