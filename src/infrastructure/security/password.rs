use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::PasswordVerifier,
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier as _},
};
use async_trait::async_trait;

/// Verifies admin passwords against an Argon2 PHC string.
#[derive(Default, Clone)]
pub struct Argon2PasswordVerifier;

impl Argon2PasswordVerifier {
    /// Rejects a configured hash that is not an Argon2 PHC string.
    pub fn check_phc(hash: &str) -> ApplicationResult<()> {
        let parsed = PasswordHash::new(hash)
            .map_err(|err| ApplicationError::infrastructure(format!("invalid PHC string: {err}")))?;
        if parsed.algorithm.as_str().starts_with("argon2") {
            Ok(())
        } else {
            Err(ApplicationError::infrastructure(format!(
                "unsupported password hash algorithm `{}`",
                parsed.algorithm
            )))
        }
    }
}

#[async_trait]
impl PasswordVerifier for Argon2PasswordVerifier {
    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        let password = password.to_owned();
        let expected_hash = expected_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&expected_hash)
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .map_err(|_| ApplicationError::unauthorized("invalid credentials"))
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng};

    fn phc(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn verifies_only_the_matching_password() {
        let hash = phc("correct horse");
        let verifier = Argon2PasswordVerifier;
        assert!(verifier.verify("correct horse", &hash).await.is_ok());
        assert!(matches!(
            verifier.verify("battery staple", &hash).await,
            Err(ApplicationError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn malformed_hash_is_an_infrastructure_error() {
        let result = Argon2PasswordVerifier.verify("pw", "not-a-phc-string").await;
        assert!(matches!(result, Err(ApplicationError::Infrastructure(_))));
    }

    #[test]
    fn check_phc_accepts_argon2_only() {
        assert!(Argon2PasswordVerifier::check_phc(&phc("pw")).is_ok());
        assert!(Argon2PasswordVerifier::check_phc("plain-text").is_err());
        assert!(Argon2PasswordVerifier::check_phc("$pbkdf2-sha256$i=1000$c2FsdA$aGFzaA").is_err());
    }
}
