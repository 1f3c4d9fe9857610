//! # Credential Hashing
//!
//! Argon2 hashing for staff passwords and security answers. The store only
//! ever sees hashes; verification happens here after the record is fetched.
//!
//! The security answer is treated exactly like a password: hashed on
//! registration, verified on recovery, generic mismatch error on failure.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use thiserror::Error;

/// Hashing failures. Rare (salt generation / parameter issues); surfaced to
/// callers as an internal error, never as a credential mismatch.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Hashing failed: {0}")]
    Hash(String),
}

/// Hashes a secret (password or security answer) with a fresh random salt.
pub fn hash_secret(secret: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a secret against a stored hash.
///
/// Any failure - malformed hash included - is a plain `false`; the caller
/// maps it to the generic credentials error without detail.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
