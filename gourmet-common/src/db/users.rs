//! User account storage

use crate::auth::{generate_salt, hash_password};
use crate::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: String,
    pub created_at: i64,
}

/// Look up a user by username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row: Option<(String, String, String, String, String, i64)> = sqlx::query_as(
        "SELECT guid, username, password_hash, password_salt, role, created_at \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(guid, username, password_hash, password_salt, role, created_at)| User {
        guid,
        username,
        password_hash,
        password_salt,
        role,
        created_at,
    }))
}

/// Create a user with a freshly salted password hash.
///
/// Fails with `InvalidInput` if the username is already taken.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    role: &str,
) -> Result<User> {
    if username.trim().is_empty() {
        return Err(Error::InvalidInput("username is required".to_string()));
    }
    if password.is_empty() {
        return Err(Error::InvalidInput("password is required".to_string()));
    }

    let salt = generate_salt();
    let user = User {
        guid: Uuid::new_v4().to_string(),
        username: username.to_string(),
        password_hash: hash_password(password, &salt),
        password_salt: salt,
        role: role.to_string(),
        created_at: chrono::Utc::now().timestamp_millis(),
    };

    let inserted = sqlx::query(
        "INSERT OR IGNORE INTO users (guid, username, password_hash, password_salt, role, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.guid)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(&user.password_salt)
    .bind(&user.role)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    if inserted.rows_affected() == 0 {
        return Err(Error::InvalidInput(format!(
            "username '{}' already exists",
            username
        )));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::db::create_schema(&pool).await.expect("schema");
        pool
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = test_pool().await;

        let created = create_user(&pool, "admin", "s3cret", "admin").await.unwrap();
        let found = find_by_username(&pool, "admin").await.unwrap().unwrap();

        assert_eq!(found.guid, created.guid);
        assert_eq!(found.role, "admin");
        assert!(verify_password("s3cret", &found.password_salt, &found.password_hash));
        assert!(!verify_password("wrong", &found.password_salt, &found.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let pool = test_pool().await;

        create_user(&pool, "admin", "s3cret", "admin").await.unwrap();
        let result = create_user(&pool, "admin", "other", "admin").await;

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unknown_user_is_none() {
        let pool = test_pool().await;
        assert!(find_by_username(&pool, "ghost").await.unwrap().is_none());
    }
}
