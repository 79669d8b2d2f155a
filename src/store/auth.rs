use super::request::RequestState;
use crate::common::{AuthSession, User};
use crate::services::ServiceError;

/// Who is signed in, and how the last auth request went.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub request: RequestState,
    pub last_error: Option<String>,
}

impl AuthState {
    /// State at startup, carrying a token restored from the session file.
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token,
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request.is_pending()
    }

    /// A stored token that has not been checked yet.
    pub fn needs_verification(&self) -> bool {
        self.token.is_some() && !self.is_authenticated
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub(crate) fn begin(&mut self) {
        self.last_error = None;
        self.request.begin();
    }

    pub(crate) fn authenticated(&mut self, session: AuthSession) {
        self.user = Some(session.user);
        self.token = Some(session.token);
        self.is_authenticated = true;
        self.request.fulfil();
    }

    pub(crate) fn verified(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.request.fulfil();
    }

    /// Login or signup failed; whatever session existed stays as it was.
    pub(crate) fn rejected(&mut self, error: ServiceError) {
        let message = error.to_string();
        self.request.reject(message.clone());
        self.last_error = Some(message);
    }

    /// The stored token was refused, so the session is gone.
    pub(crate) fn token_rejected(&mut self, error: ServiceError) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.rejected(error);
    }

    pub(crate) fn signed_out(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
        self.last_error = None;
        self.request.fulfil();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    fn session() -> AuthSession {
        AuthSession {
            user: seed::demo_user(),
            token: "mock-jwt-token-1".into(),
        }
    }

    #[test]
    fn default_is_signed_out() {
        let state = AuthState::default();
        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
        assert!(!state.is_loading());
        assert!(!state.needs_verification());
    }

    #[test]
    fn restored_token_needs_verification() {
        let state = AuthState::with_token(Some("mock-jwt-token-1".into()));
        assert!(state.needs_verification());
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut state = AuthState::default();
        state.begin();
        state.rejected(ServiceError::Rejected("Invalid username or password".into()));
        assert_eq!(state.last_error.as_deref(), Some("Invalid username or password"));
        assert!(!state.is_authenticated);

        state.begin();
        assert!(state.last_error.is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn authenticated_stores_user_and_token() {
        let mut state = AuthState::default();
        state.begin();
        state.authenticated(session());
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(state.token.as_deref(), Some("mock-jwt-token-1"));
        assert!(!state.is_loading());
    }

    #[test]
    fn token_rejection_drops_the_session() {
        let mut state = AuthState::with_token(Some("stale".into()));
        state.begin();
        state.token_rejected(ServiceError::Rejected("Invalid token".into()));
        assert!(state.token.is_none());
        assert!(!state.needs_verification());
        assert_eq!(state.request.error(), Some("Invalid token"));
    }

    #[test]
    fn sign_out_clears_everything() {
        let mut state = AuthState::default();
        state.authenticated(session());
        state.signed_out();
        assert!(state.user.is_none());
        assert!(state.token.is_none());
        assert!(!state.is_authenticated);
    }
}
