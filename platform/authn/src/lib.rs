//! Platform authentication helpers.
//!
//! Employee passwords are stored as argon2 PHC strings with a per-record
//! random salt. Plain text never reaches the database.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthnError {
    #[error("password hashing failed: {0}")]
    Hash(password_hash::Error),
    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hash `plain` with a freshly generated salt.
pub fn hash_password(plain: &str) -> Result<String, AuthnError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AuthnError::Hash)
}

/// Check `plain` against a hash produced by [`hash_password`].
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, AuthnError> {
    let parsed = PasswordHash::new(stored).map_err(|_| AuthnError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
