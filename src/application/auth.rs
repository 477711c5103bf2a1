// src/application/auth.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::security::PasswordVerifier,
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    pub username: String,
}

/// Checks credentials for the single configured admin account.
pub struct AdminAuthenticator {
    username: String,
    password_hash: Option<String>,
    verifier: Arc<dyn PasswordVerifier>,
}

impl AdminAuthenticator {
    pub fn new(
        username: impl Into<String>,
        password_hash: Option<String>,
        verifier: Arc<dyn PasswordVerifier>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash,
            verifier,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> ApplicationResult<AdminUser> {
        let expected_hash = self
            .password_hash
            .as_deref()
            .ok_or_else(|| ApplicationError::unauthorized("admin login is disabled"))?;

        // The hash check runs even when the username is wrong.
        let verified = self.verifier.verify(password, expected_hash).await;
        if username != self.username {
            return Err(ApplicationError::unauthorized("invalid credentials"));
        }
        verified?;

        Ok(AdminUser {
            username: self.username.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct PlainVerifier;

    #[async_trait]
    impl PasswordVerifier for PlainVerifier {
        async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
            if expected_hash == format!("plain:{password}") {
                Ok(())
            } else {
                Err(ApplicationError::unauthorized("invalid credentials"))
            }
        }
    }

    fn authenticator(hash: Option<&str>) -> AdminAuthenticator {
        AdminAuthenticator::new("admin", hash.map(str::to_string), Arc::new(PlainVerifier))
    }

    #[tokio::test]
    async fn accepts_matching_credentials() {
        let user = authenticator(Some("plain:secret"))
            .authenticate("admin", "secret")
            .await
            .unwrap();
        assert_eq!(user.username, "admin");
    }

    #[tokio::test]
    async fn rejects_wrong_username_or_password() {
        let auth = authenticator(Some("plain:secret"));
        assert!(matches!(
            auth.authenticate("root", "secret").await,
            Err(ApplicationError::Unauthorized(_))
        ));
        assert!(matches!(
            auth.authenticate("admin", "guess").await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn disabled_without_hash() {
        let auth = authenticator(None);
        assert!(!auth.is_enabled());
        assert!(matches!(
            auth.authenticate("admin", "secret").await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }
}
