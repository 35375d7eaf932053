//! Salted password hashing
//!
//! Hash and salt are stored in separate columns of the users table. The hash
//! is SHA-256 over `salt || password`, hex encoded.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a random 16-byte salt, hex encoded
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with the given salt
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a password attempt against a stored salt and hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);

        assert!(verify_password("hunter2", &salt, &hash));
        assert!(!verify_password("hunter3", &salt, &hash));
    }

    #[test]
    fn test_salts_are_random() {
        assert_ne!(generate_salt(), generate_salt());
    }

    #[test]
    fn test_same_password_different_salt_different_hash() {
        let a = hash_password("hunter2", &generate_salt());
        let b = hash_password("hunter2", &generate_salt());
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_password("hunter2", "00");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
