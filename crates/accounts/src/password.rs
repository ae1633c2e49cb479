//! Password hashing.
//!
//! Passwords are stored as Argon2id PHC strings; plaintext never leaves the
//! call that received it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;
use thiserror::Error;

/// Random bytes in a password salt (128 bits).
const SALT_BYTES: usize = 16;

/// Hashing a password failed.
#[derive(Debug, Error)]
#[error("password hashing error")]
pub struct PasswordHashError;

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `PasswordHashError` if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    let salt = SaltString::encode_b64(&bytes).map_err(|_| PasswordHashError)?;
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordHashError)
}

/// Verify a password against a stored hash.
///
/// A malformed stored hash never verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("Password1").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Password1", &hash));
        assert!(!verify_password("password1", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("Password1").unwrap();
        let second = hash_password("Password1").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("Password1", "Password1"));
        assert!(!verify_password("", ""));
    }
}
