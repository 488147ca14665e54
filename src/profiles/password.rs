//! Password hashing
//!
//! New hashes are Argon2id PHC strings with a random salt. Accounts created
//! by older releases carry an unsalted SHA-256 hex digest; those still
//! verify and are reported by `needs_rehash` so the caller can upgrade them.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sha2::{Digest, Sha256};

use super::errors::{ProfileError, ProfileResult};

/// Length of a hex-encoded SHA-256 digest
const LEGACY_DIGEST_LEN: usize = 64;

/// Hash a password with Argon2id
pub fn hash_password(password: &str) -> ProfileResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ProfileError::HashFailed(e.to_string()))
}

/// Check a password against a stored hash of either format.
/// An empty stored hash never verifies.
pub fn verify_password(password: &str, stored: &str) -> ProfileResult<bool> {
    if stored.is_empty() {
        return Ok(false);
    }

    if is_legacy_digest(stored) {
        return Ok(legacy_digest(password).eq_ignore_ascii_case(stored));
    }

    let parsed = PasswordHash::new(stored).map_err(|e| ProfileError::MalformedHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Whether a stored hash should be replaced with a fresh Argon2 hash
pub fn needs_rehash(stored: &str) -> bool {
    is_legacy_digest(stored)
}

fn is_legacy_digest(stored: &str) -> bool {
    stored.len() == LEGACY_DIGEST_LEN && stored.chars().all(|c| c.is_ascii_hexdigit())
}

fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
        assert!(!needs_rehash(&hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same").unwrap();
        let second = hash_password("same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_legacy_digest() {
        // sha256("password")
        let stored = "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";
        assert!(needs_rehash(stored));
        assert!(verify_password("password", stored).unwrap());
        assert!(!verify_password("Password", stored).unwrap());
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(!verify_password("anything", "").unwrap());
        assert!(matches!(
            verify_password("anything", "not-a-hash"),
            Err(ProfileError::MalformedHash(_))
        ));
    }
}
