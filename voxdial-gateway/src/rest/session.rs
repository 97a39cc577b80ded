//! Signed-in session state.

use voxdial_core::models::User;

/// Token and profile of the signed-in user.
///
/// Held by [`ApiClient`](super::ApiClient); every request reads the token
/// from here.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Creates a session for a signed-in user.
    #[must_use]
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    /// Creates a session that only carries a token, e.g. one passed on the
    /// command line.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
        }
    }

    /// Bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Signed-in user, if known.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Returns true if a token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_session_clear() {
        let mut session = Session::new("abc", User::from_login("ops@example.com", Utc::now()));
        assert!(session.has_token());
        assert_eq!(session.user().map(|u| u.email.as_str()), Some("ops@example.com"));

        session.clear();
        assert_eq!(session, Session::default());
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = Session::with_token("secret-token");
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
