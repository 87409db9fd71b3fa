use uuid::Uuid;

use crate::{EngineError, ResultEngine};

use super::Engine;

impl Engine {
    /// Checks `email`/`password` against the configured account and returns a
    /// fresh opaque token.
    ///
    /// Tokens are not remembered: nothing in the engine verifies them later.
    pub fn login(&self, email: &str, password: &str) -> ResultEngine<String> {
        match &self.credentials {
            Some(credentials) if credentials.matches(email, password) => {
                tracing::info!(email, "login succeeded");
                Ok(Uuid::new_v4().simple().to_string())
            }
            _ => {
                tracing::info!(email, "login rejected");
                Err(EngineError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Credentials, Engine, EngineError};

    #[tokio::test]
    async fn login_requires_configured_account() {
        let engine = Engine::builder()
            .credentials(Credentials::new("user@test.com", "p1"))
            .build()
            .await
            .unwrap();

        let first = engine.login("user@test.com", "p1").unwrap();
        let second = engine.login("user@test.com", "p1").unwrap();
        assert_eq!(first.len(), 32);
        assert_ne!(first, second);

        assert_eq!(
            engine.login("user@test.com", "wrong"),
            Err(EngineError::InvalidCredentials)
        );
        assert_eq!(
            engine.login("other@test.com", "p1"),
            Err(EngineError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn login_fails_without_account() {
        let engine = Engine::builder().build().await.unwrap();
        assert_eq!(
            engine.login("user@test.com", "p1"),
            Err(EngineError::InvalidCredentials)
        );
    }
}
