//! Login endpoint: credential check and bearer token issuance
//!
//! Accounts are provisioned exclusively through the `create-admin`
//! subcommand; login never materializes a default account.

use axum::{extract::State, Json};
use gourmet_common::auth::{issue_token, verify_password, TokenClaims};
use gourmet_common::db::users;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub name: String,
}

/// POST /auth/login
///
/// Verifies the salted password hash and issues a signed token valid for
/// 24 hours. Unknown usernames and wrong passwords get the same generic
/// 401 so the response does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = users::find_by_username(&state.db, &request.username)
        .await?
        .ok_or_else(|| {
            warn!(username = %request.username, "login failed: unknown user");
            ApiError::Unauthorized("Invalid credentials".to_string())
        })?;

    if !verify_password(&request.password, &user.password_salt, &user.password_hash) {
        warn!(username = %user.username, "login failed: bad password");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = TokenClaims::new(&user.guid, &user.username, &user.role);
    let token = issue_token(&claims, &state.token_secret);

    info!(username = %user.username, "login succeeded");

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            name: user.username,
        },
    }))
}
