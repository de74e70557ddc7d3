use anyhow::Context as _;
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::domain::repository::CredentialHasher;
use crate::error::BlogServiceError;

/// Argon2id with default parameters, PHC-encoded. Runs on the blocking pool.
#[derive(Clone, Copy, Default)]
pub struct Argon2Hasher;

fn hash_blocking(password: &str) -> Result<String, BlogServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BlogServiceError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, BlogServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| BlogServiceError::Internal(anyhow::anyhow!("parse password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

impl CredentialHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, BlogServiceError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .context("join password hash task")?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, BlogServiceError> {
        let (password, hash) = (password.to_owned(), hash.to_owned());
        tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
            .await
            .context("join password verify task")?
    }
}
