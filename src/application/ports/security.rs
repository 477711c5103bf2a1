// src/application/ports/security.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Checks a plaintext password against a stored hash.
#[async_trait]
pub trait PasswordVerifier: Send + Sync {
    /// `Unauthorized` on mismatch; `Infrastructure` when the stored hash is unusable.
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()>;
}
