//! Password hashing.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{Error as HashError, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("password hashing failed")]
pub struct PasswordError(#[source] HashError);

/// Hash a password into a PHC string with a fresh random salt.
///
/// # Errors
///
/// Returns an error if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError)
}

/// Check a password against a stored PHC string.
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(password_hash).map_err(PasswordError)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(error) => Err(PasswordError(error)),
    }
}
