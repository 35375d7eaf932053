//! Authentication primitives
//!
//! Bearer tokens and password hashing are built from the same building
//! blocks used elsewhere in the service: SHA-256 digests keyed by a random
//! per-install secret stored in the settings table, and random salts.

pub mod password;
pub mod token;

pub use password::{generate_salt, hash_password, verify_password};
pub use token::{issue_token, verify_token, TokenClaims, TokenError, TOKEN_TTL_SECS};
