//! Argon2id password hashing.
//!
//! Hashing and verification are CPU bound, so both run on the blocking pool.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};

/// Verified in place of a real hash when no account matches, so unknown
/// e-mails cost the same as wrong passwords.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$cMj/tp7nluJZKt/b6L1j7A$BsLPsI5nAyY94yrr6eaAAeq0uXywPaPfFhGm9eagrW4";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("failed to hash password")]
    Hash(#[source] argon2::password_hash::Error),

    #[error("password hashing task failed")]
    Task(#[source] JoinError),
}

/// Hash a plaintext password with a fresh random salt, in PHC string format.
///
/// # Errors
///
/// Returns an error if hashing fails or the blocking task is cancelled.
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(PasswordError::Hash)
    })
    .await
    .map_err(PasswordError::Task)?
}

/// Check a plaintext password against a stored PHC hash.
///
/// Malformed hashes never verify.
///
/// # Errors
///
/// Returns an error if the blocking task is cancelled.
pub async fn verify_password(password: String, stored: String) -> Result<bool, PasswordError> {
    spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&stored) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(PasswordError::Task)
}

/// Burn one verification's worth of work for a login with no matching account.
///
/// # Errors
///
/// Returns an error if the blocking task is cancelled.
pub async fn verify_dummy(password: String) -> Result<(), PasswordError> {
    verify_password(password, DUMMY_HASH.to_string()).await?;

    Ok(())
}
