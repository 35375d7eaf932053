//! Administrator provisioning
//!
//! Admin accounts are created explicitly from the command line, never
//! auto-seeded at startup.

use gourmet_common::db::users;
use gourmet_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Create the named admin account.
///
/// Fails if an account with that username already exists; existing
/// credentials are never silently overwritten.
pub async fn provision_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<()> {
    if users::find_by_username(pool, username).await?.is_some() {
        return Err(Error::InvalidInput(format!(
            "user '{}' already exists",
            username
        )));
    }

    let user = users::create_user(pool, username, password, "admin").await?;
    info!(username = %user.username, guid = %user.guid, "admin account created");
    Ok(())
}
