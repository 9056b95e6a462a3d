//! # Authentication Module
//!
//! The admin endpoints (booking list, removal, broadcast) are gated by a
//! single shared passphrase sent in the `x-admin-passphrase` header. The
//! passphrase is hashed with Argon2 at startup and only the hash is kept in
//! memory; each request is verified against it.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use eyre::{eyre, Result};
use tracing::warn;
use workshop_core::errors::BookingError;

use crate::{middleware::error_handling::AppError, ApiState};

/// Header carrying the admin passphrase
pub const ADMIN_HEADER: &str = "x-admin-passphrase";

/// Hashes a password using the Argon2 algorithm
///
/// Uses a fresh random salt and default Argon2 parameters; the result is a
/// PHC string (algorithm, version, parameters, salt and hash).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a PHC hash produced by [`hash_password`].
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| eyre!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Holds the hashed admin passphrase.
#[derive(Debug, Clone)]
pub struct AdminGate {
    hash: String,
}

impl AdminGate {
    pub fn new(passphrase: &str) -> Result<Self> {
        Ok(Self {
            hash: hash_password(passphrase)?,
        })
    }

    /// Argon2 is CPU-bound, so the check runs on the blocking pool.
    pub async fn verify(&self, candidate: &str) -> bool {
        let hash = self.hash.clone();
        let candidate = candidate.to_string();

        match tokio::task::spawn_blocking(move || verify_password(&candidate, &hash)).await {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                warn!(error = %e, "Admin passphrase check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Admin passphrase check did not complete");
                false
            }
        }
    }
}

/// Extractor that rejects the request with 401 unless it carries the admin
/// passphrase.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let candidate = parts
            .headers
            .get(ADMIN_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if candidate.is_empty() || !state.admin.verify(candidate).await {
            warn!(path = %parts.uri.path(), "Rejected admin request");
            return Err(AppError(BookingError::Authentication(
                "Invalid admin passphrase".to_string(),
            )));
        }

        Ok(RequireAdmin)
    }
}
