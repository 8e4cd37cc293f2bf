//! Mutable session state for an authenticated client.

use std::fmt;

use chrono::{DateTime, Utc};

/// The token state of a client context.
///
/// A session holds the current access token (empty means unauthenticated),
/// its absolute expiry, and the current refresh token. It is overwritten
/// wholesale on every successful token acquisition and never partially
/// updated, so the three fields always come from the same response.
///
/// # Security
///
/// Token values are never exposed in Debug output.
#[derive(Clone, Default)]
pub(crate) struct Session {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
    refresh_token: Option<String>,
}

impl Session {
    /// Create an unauthenticated session.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Overwrite the whole token triple from one token response.
    pub(crate) fn replace(
        &mut self,
        access_token: String,
        expires_at: Option<DateTime<Utc>>,
        refresh_token: Option<String>,
    ) {
        self.access_token = access_token;
        self.expires_at = expires_at;
        self.refresh_token = refresh_token;
    }

    /// Reset to the unauthenticated state.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the current access token. Empty means unauthenticated.
    pub(crate) fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the expiry of the current access token.
    pub(crate) fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the current refresh token.
    pub(crate) fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// True when a token request has succeeded with a non-empty token
    /// since the session was last cleared.
    pub(crate) fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}

// Hide token values in Debug output
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field(
                "access_token",
                if self.access_token.is_empty() {
                    &"<empty>"
                } else {
                    &"[REDACTED]"
                },
            )
            .field("expires_at", &self.expires_at)
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), "");
        assert!(session.refresh_token().is_none());
        assert!(session.expires_at().is_none());
    }

    #[test]
    fn replace_overwrites_all_fields() {
        let mut session = Session::new();
        let expiry = Utc::now();
        session.replace("token".to_string(), Some(expiry), Some("refresh".to_string()));
        assert!(session.is_authenticated());
        assert_eq!(session.access_token(), "token");
        assert_eq!(session.expires_at(), Some(expiry));
        assert_eq!(session.refresh_token(), Some("refresh"));

        // A later response with fewer fields still replaces everything.
        session.replace(String::new(), None, None);
        assert!(!session.is_authenticated());
        assert!(session.expires_at().is_none());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn clear_resets_state() {
        let mut session = Session::new();
        session.replace("token".to_string(), None, Some("refresh".to_string()));
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn debug_never_shows_tokens() {
        let mut session = Session::new();
        session.replace(
            "eyJhbGciOiJIUzI1NiJ9.x.y".to_string(),
            None,
            Some("refresh-value".to_string()),
        );
        let debug = format!("{:?}", session);
        assert!(!debug.contains("eyJ"));
        assert!(!debug.contains("refresh-value"));
        assert!(debug.contains("[REDACTED]"));
    }
}
