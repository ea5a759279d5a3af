//! Process-wide auth session state. Successful submissions store the session
//! token here, overwriting any previous session. The token is held as a
//! `SecretString` and only exposed on explicit request.

use secrecy::SecretString;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct AuthState {
    token: Option<SecretString>,
    guided_tour_pending: bool,
}

/// Auth session context shared by every form of the process.
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<AuthState>>,
}

impl AuthContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the session token, replacing any prior session.
    pub fn set_token(&self, token: SecretString) {
        let mut state = self.write();
        if state.token.replace(token).is_some() {
            debug!("previous session replaced");
        }
        state.guided_tour_pending = false;
    }

    /// Records that a freshly registered super admin should see the guided tour.
    pub fn mark_guided_tour_pending(&self) {
        self.write().guided_tour_pending = true;
    }

    #[must_use]
    pub fn guided_tour_pending(&self) -> bool {
        self.read().guided_tour_pending
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    /// Clears the session, typically on logout.
    pub fn clear(&self) {
        *self.write() = AuthState::default();
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn set_token_overwrites_previous_session() {
        let auth = AuthContext::new();
        assert!(!auth.is_authenticated());

        auth.set_token(SecretString::from("first".to_string()));
        auth.set_token(SecretString::from("second".to_string()));

        let token = auth.token().expect("token");
        assert_eq!(token.expose_secret(), "second");
    }

    #[test]
    fn clones_share_the_same_session() {
        let auth = AuthContext::new();
        let other = auth.clone();
        other.set_token(SecretString::from("shared".to_string()));
        assert!(auth.is_authenticated());

        auth.clear();
        assert!(!other.is_authenticated());
    }

    #[test]
    fn guided_tour_flag_resets_with_new_session() {
        let auth = AuthContext::new();
        auth.set_token(SecretString::from("admin".to_string()));
        auth.mark_guided_tour_pending();
        assert!(auth.guided_tour_pending());

        auth.set_token(SecretString::from("other".to_string()));
        assert!(!auth.guided_tour_pending());
    }
}
