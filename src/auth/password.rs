//! Argon2 digests for the `passwordHash` field of user records.
//!
//! Handlers use the async [`hash_password`] / [`verify_password`], which run
//! the work on the blocking pool so it never holds a runtime worker or the
//! document write lock.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::error::AppError;

/// Salted PHC string for `password`.
pub fn digest(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 digest failed");
            AppError::Internal(anyhow::anyhow!("argon2 digest: {e}"))
        })
}

/// `Ok(false)` on mismatch; `Err` only when the stored digest is unparseable.
pub fn verify(password: &str, stored: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password digest is unparseable");
        AppError::Internal(anyhow::anyhow!("argon2 parse: {e}"))
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || digest(&password))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}

pub async fn verify_password(password: String, stored: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
}
