use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::AuthService;
use super::seed::{self, DEMO_PASSWORD, DEMO_USERNAME, TOKEN_PREFIX};
use crate::common::{AuthSession, Envelope, LoginCredentials, SignupCredentials, User};
use crate::config::{LatencyConfig, millis};

/// Accepts only the demo account and hands out `mock-jwt-token-*` tokens.
pub struct MockAuthService {
    login_delay: Duration,
    signup_delay: Duration,
    verify_delay: Duration,
}

impl MockAuthService {
    pub fn new(latency: &LatencyConfig) -> Self {
        Self {
            login_delay: millis(latency.login_ms),
            signup_delay: millis(latency.signup_ms),
            verify_delay: millis(latency.verify_token_ms),
        }
    }
}

fn issue_token() -> String {
    format!("{TOKEN_PREFIX}{}", Utc::now().timestamp_millis())
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, credentials: LoginCredentials) -> Envelope<AuthSession> {
        tokio::time::sleep(self.login_delay).await;

        if credentials.username == DEMO_USERNAME && credentials.password == DEMO_PASSWORD {
            return Envelope::ok(AuthSession {
                user: seed::demo_user(),
                token: issue_token(),
            });
        }

        Envelope::err("Invalid username or password")
    }

    async fn signup(&self, credentials: SignupCredentials) -> Envelope<AuthSession> {
        tokio::time::sleep(self.signup_delay).await;

        let user = seed::new_user(
            Utc::now().timestamp_millis().to_string(),
            &credentials.username,
            &credentials.email,
        );
        Envelope::ok(AuthSession {
            user,
            token: issue_token(),
        })
    }

    async fn logout(&self) -> Envelope<()> {
        Envelope::ok(())
    }

    async fn verify_token(&self, token: String) -> Envelope<User> {
        tokio::time::sleep(self.verify_delay).await;

        if token.starts_with(TOKEN_PREFIX) {
            Envelope::ok(seed::demo_user())
        } else {
            Envelope::err("Invalid token")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockAuthService {
        MockAuthService::new(&LatencyConfig::instant())
    }

    #[tokio::test]
    async fn demo_login_succeeds() {
        let envelope = service()
            .login(LoginCredentials {
                username: "demo".into(),
                password: "password".into(),
            })
            .await;
        let session = envelope.into_result("Login failed").unwrap();
        assert_eq!(session.user.id, "1");
        assert!(session.token.starts_with(TOKEN_PREFIX));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let envelope = service()
            .login(LoginCredentials {
                username: "demo".into(),
                password: "wrong".into(),
            })
            .await;
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("Invalid username or password"));
    }

    #[tokio::test]
    async fn signup_echoes_profile() {
        let session = service()
            .signup(SignupCredentials {
                username: "erin".into(),
                email: "erin@example.com".into(),
                password: "hunter22".into(),
                confirm_password: "hunter22".into(),
            })
            .await
            .into_result("Signup failed")
            .unwrap();
        assert_eq!(session.user.username, "erin");
        assert_eq!(session.user.email, "erin@example.com");
        assert_ne!(session.user.id, "1");
    }

    #[tokio::test]
    async fn verify_checks_token_prefix() {
        let ok = service().verify_token(issue_token()).await;
        assert_eq!(ok.data.map(|u| u.id), Some("1".to_string()));

        let bad = service().verify_token("garbage".into()).await;
        assert_eq!(bad.error.as_deref(), Some("Invalid token"));
    }
}
