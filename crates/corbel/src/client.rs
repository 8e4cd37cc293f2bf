//! The platform client context.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::auth::ClientCredentials;
use crate::auth::session::Session;
use crate::error::{AuthError, Error};
use crate::http::{HttpClient, TokenResponse};
use crate::types::Environment;

/// A client for the Corbel platform.
///
/// Owns the immutable identity configuration ([`ClientCredentials`]), the
/// HTTP transport, and the mutable session state (current access token,
/// expiry, refresh token). Token operations live in [`crate::iam`] and are
/// exposed as methods on this type.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use an internal `Arc`) and safe to share
/// across tasks. The session is updated under a single write lock so the
/// token, its expiry, and the refresh token always come from one response.
/// Independent clients share nothing.
///
/// # Example
///
/// ```no_run
/// use corbel::{Client, ClientCredentials, Environment};
///
/// # async fn example() -> Result<(), corbel::Error> {
/// let credentials = ClientCredentials::new("a9fb0e79", "client-secret")
///     .with_domain("silkroad-qa")
///     .with_name("test-client");
/// let client = Client::new(Environment::qa(), credentials);
///
/// client.acquire_token().await?;
/// assert!(client.is_authenticated().await);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    credentials: ClientCredentials,
    http: HttpClient,
    session: RwLock<Session>,
}

impl Client {
    /// Create a client for the given environment and identity.
    ///
    /// The HTTP transport is built here and owned by this client; nothing
    /// is shared process-wide.
    pub fn new(environment: Environment, credentials: ClientCredentials) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                credentials,
                http: HttpClient::new(environment),
                session: RwLock::new(Session::new()),
            }),
        }
    }

    /// Returns the environment this client talks to.
    pub fn environment(&self) -> &Environment {
        self.inner.http.environment()
    }

    /// Returns the client identity configuration.
    pub fn credentials(&self) -> &ClientCredentials {
        &self.inner.credentials
    }

    /// Returns the current access token, or `None` when unauthenticated.
    ///
    /// Other platform subsystems read this to attach `Authorization`
    /// headers on their requests.
    pub async fn current_token(&self) -> Option<String> {
        let session = self.inner.session.read().await;
        if session.is_authenticated() {
            Some(session.access_token().to_string())
        } else {
            None
        }
    }

    /// Returns the absolute expiry of the current access token.
    pub async fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.session.read().await.expires_at()
    }

    /// Returns the current refresh token, if the last acquisition issued one.
    pub async fn current_refresh_token(&self) -> Option<String> {
        self.inner
            .session
            .read()
            .await
            .refresh_token()
            .map(str::to_string)
    }

    /// True when the session holds a non-empty access token.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.session.read().await.is_authenticated()
    }

    /// Returns the transport for request building.
    pub(crate) fn http(&self) -> &HttpClient {
        &self.inner.http
    }

    /// Returns the access token or fails when unauthenticated.
    ///
    /// Used by resource operations that must attach a bearer token.
    pub(crate) async fn bearer_token(&self) -> Result<String, Error> {
        let session = self.inner.session.read().await;
        if session.is_authenticated() {
            Ok(session.access_token().to_string())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    /// Overwrite the session triple from one token response.
    ///
    /// Applied under a single write guard; a missing `accessToken` yields an
    /// empty (unauthenticated) session, which is a valid outcome.
    pub(crate) async fn apply_token_response(&self, response: TokenResponse) {
        let expires_at = response.expires_at_utc();
        let mut session = self.inner.session.write().await;
        session.replace(
            response.access_token.unwrap_or_default(),
            expires_at,
            response.refresh_token,
        );
    }

    /// Reset the session to the unauthenticated state.
    pub(crate) async fn clear_session(&self) {
        self.inner.session.write().await.clear();
    }
}

// Custom Debug impl that hides session state
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("environment", self.environment())
            .field("credentials", &self.inner.credentials)
            .field("session", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_client_is_unauthenticated() {
        let client = Client::new(
            Environment::qa(),
            ClientCredentials::new("id", "secret"),
        );
        assert!(!client.is_authenticated().await);
        assert!(client.current_token().await.is_none());
        assert!(client.current_refresh_token().await.is_none());
        assert!(matches!(
            client.bearer_token().await,
            Err(Error::Auth(AuthError::NotAuthenticated))
        ));
    }

    #[tokio::test]
    async fn token_response_overwrites_session_wholesale() {
        let client = Client::new(
            Environment::qa(),
            ClientCredentials::new("id", "secret"),
        );

        client
            .apply_token_response(TokenResponse {
                access_token: Some("token-1".to_string()),
                expires_at: Some(1_735_689_600_000),
                refresh_token: Some("refresh-1".to_string()),
            })
            .await;
        assert_eq!(client.current_token().await.as_deref(), Some("token-1"));
        assert_eq!(
            client.token_expires_at().await.unwrap().timestamp(),
            1_735_689_600
        );

        // A bare response replaces every field, not just the token.
        client
            .apply_token_response(TokenResponse {
                access_token: None,
                expires_at: None,
                refresh_token: None,
            })
            .await;
        assert!(client.current_token().await.is_none());
        assert!(client.token_expires_at().await.is_none());
        assert!(client.current_refresh_token().await.is_none());
    }
}
