//! Signed, time-limited bearer tokens
//!
//! Token layout: `base64url(claims JSON) . hex(SHA-256(payload || secret))`.
//! The signature covers the encoded payload; the secret is the random
//! per-install value persisted in the settings table. Tokens expire 24 hours
//! after issuance.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Token lifetime: 24 hours
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims carried inside a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated user identifier
    pub sub: String,
    /// Display name for the client
    pub name: String,
    /// User role (currently always "admin")
    pub role: String,
    /// Issued-at, Unix epoch seconds
    pub iat: i64,
    /// Expiry, Unix epoch seconds
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a user valid for [`TOKEN_TTL_SECS`] from now
    pub fn new(sub: &str, name: &str, role: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: sub.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        }
    }
}

/// Token verification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token expired")]
    Expired,
}

fn sign(payload: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mint a signed token for the given claims
pub fn issue_token(claims: &TokenClaims, secret: &str) -> String {
    let payload = serde_json::json!({
        "sub": claims.sub,
        "name": claims.name,
        "role": claims.role,
        "iat": claims.iat,
        "exp": claims.exp,
    });
    let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
    let signature = sign(&encoded, secret);
    format!("{}.{}", encoded, signature)
}

/// Verify a token's signature and expiry, returning its claims
pub fn verify_token(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;

    if sign(payload, secret) != signature {
        return Err(TokenError::BadSignature);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let claims: TokenClaims =
        serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

    if claims.exp < chrono::Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "e31b7a4f6f3d4c0d9f2a8b5c6d7e8f90";

    #[test]
    fn test_round_trip() {
        let claims = TokenClaims::new("user-1", "Admin User", "admin");
        let token = issue_token(&claims, SECRET);

        let verified = verify_token(&token, SECRET).expect("token should verify");
        assert_eq!(verified.sub, "user-1");
        assert_eq!(verified.name, "Admin User");
        assert_eq!(verified.role, "admin");
        assert_eq!(verified.exp - verified.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let claims = TokenClaims::new("user-1", "Admin User", "admin");
        let token = issue_token(&claims, SECRET);

        assert_eq!(
            verify_token(&token, "another-secret"),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let claims = TokenClaims::new("user-1", "Admin User", "admin");
        let token = issue_token(&claims, SECRET);

        let (payload, signature) = token.split_once('.').unwrap();
        let mut forged_claims = claims.clone();
        forged_claims.role = "superadmin".to_string();
        let forged_payload = issue_token(&forged_claims, SECRET);
        let forged_payload = forged_payload.split_once('.').unwrap().0.to_string();
        assert_ne!(payload, forged_payload);

        let forged = format!("{}.{}", forged_payload, signature);
        assert_eq!(verify_token(&forged, SECRET), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut claims = TokenClaims::new("user-1", "Admin User", "admin");
        claims.iat -= 2 * TOKEN_TTL_SECS;
        claims.exp -= 2 * TOKEN_TTL_SECS;
        let token = issue_token(&claims, SECRET);

        assert_eq!(verify_token(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(verify_token("not-a-token", SECRET), Err(TokenError::Malformed));
        assert_eq!(verify_token("a.b.c", SECRET), Err(TokenError::BadSignature));
    }
}
