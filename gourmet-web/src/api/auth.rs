//! Bearer token authentication middleware
//!
//! Applied to mutating routes and the AI drafting endpoint; public reads,
//! login and the health endpoint skip it.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use gourmet_common::auth::{verify_token, TokenError};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header against the
/// per-install signing secret. Returns 401 Unauthorized on a missing,
/// malformed, tampered or expired token. Verified claims are attached to
/// the request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = verify_token(token, &state.token_secret).map_err(|e| {
        warn!("token rejected: {}", e);
        match e {
            TokenError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            TokenError::Malformed | TokenError::BadSignature => {
                ApiError::Unauthorized("Invalid token".to_string())
            }
        }
    })?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
