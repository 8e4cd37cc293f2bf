//! Token acquisition, upgrade, and refresh.
//!
//! These operations implement the platform's signed-assertion OAuth flow.
//! Each call is a single awaited round-trip; there is no retry, backoff, or
//! background refresh here. Retry policy belongs to the caller.

use tracing::{debug, info, instrument};

use crate::auth::assertion::sign_assertion;
use crate::client::Client;
use crate::error::{AuthError, Error};
use crate::http::TokenResponse;
use crate::http::endpoints::{
    IAM, JWT_BEARER_GRANT, OAUTH_TOKEN, OAUTH_TOKEN_UPGRADE, REFRESH_TOKEN_GRANT,
    RefreshTokenRequest, TokenRequest,
};

impl Client {
    /// Acquire an access token with a client-credentials-only grant.
    ///
    /// Equivalent to [`Client::acquire_token_basic_auth`] with empty
    /// username and password.
    pub async fn acquire_token(&self) -> Result<(), Error> {
        self.acquire_token_basic_auth("", "").await
    }

    /// Acquire an access token, optionally on behalf of a user.
    ///
    /// Builds a signed assertion from the client identity; non-empty
    /// `username`/`password` are added as `basic_auth` claims so the
    /// platform logs the user in as part of the grant. On success the
    /// session's token, expiry, and refresh token are overwritten as one
    /// unit from the response.
    ///
    /// A 200 response with no access token means the basic-auth pair
    /// matched no account. That is a documented non-error outcome: the call
    /// returns `Ok(())` and leaves the session unauthenticated.
    ///
    /// # Errors
    ///
    /// - [`AuthError::AssertionEncoding`] if signing fails (configuration
    ///   bug, not retried)
    /// - [`AuthError::Authorization`] if the request could not reach the
    ///   token endpoint
    /// - [`crate::DecodeError`] if the response body is malformed
    #[instrument(skip(self, password), fields(environment = %self.environment()))]
    pub async fn acquire_token_basic_auth(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), Error> {
        info!("Acquiring access token");

        let assertion = sign_assertion(self.credentials(), username, password)?;
        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT,
            assertion: &assertion,
        };

        let response: TokenResponse = self
            .http()
            .form_post(IAM, OAUTH_TOKEN, &request)
            .await
            .map_err(|err| match err {
                // The caller cannot tell a network fault from a rejection
                // during the token exchange, so transport failures surface
                // as authorization failures.
                Error::Transport(transport) => Error::Auth(AuthError::Authorization {
                    message: transport.to_string(),
                }),
                other => other,
            })?;

        let matched = response
            .access_token
            .as_deref()
            .is_some_and(|t| !t.is_empty());
        debug!(matched, "Token response received");

        self.apply_token_response(response).await;
        Ok(())
    }

    /// Exchange an assets-scoped token for one carrying its extra scopes.
    ///
    /// The supplied token (obtained from the Assets subsystem) is sent as
    /// the assertion of a GET request with a form-encoded body, which is how
    /// the platform's upgrade endpoint is shaped. The session is not
    /// touched; the upgraded token response is returned for the caller to
    /// consume. This is intentionally asymmetric with acquisition.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthorized`] on a 401; the caller must
    /// re-authenticate, and the call is never retried here. Any other
    /// failure is propagated unchanged.
    #[instrument(skip(self, assets_token), fields(environment = %self.environment()))]
    pub async fn upgrade_token(&self, assets_token: &str) -> Result<TokenResponse, Error> {
        info!("Upgrading access token");

        let request = TokenRequest {
            grant_type: JWT_BEARER_GRANT,
            assertion: assets_token,
        };

        match self
            .http()
            .form_get::<_, TokenResponse>(IAM, OAUTH_TOKEN_UPGRADE, &request)
            .await
        {
            Ok(response) => Ok(response),
            Err(Error::Protocol(protocol)) if protocol.status == 401 => {
                Err(AuthError::NotAuthorized.into())
            }
            Err(other) => Err(other),
        }
    }

    /// Exchange the session's refresh token for a new access token.
    ///
    /// No fresh assertion is signed; the current refresh token is the
    /// grant. On success the session triple is overwritten wholesale. On
    /// any failure the session is cleared and the caller must re-acquire.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingRefreshToken`] when the session holds no
    /// refresh token (nothing was acquired, or the last acquisition did not
    /// issue one).
    #[instrument(skip(self), fields(environment = %self.environment()))]
    pub async fn refresh_token(&self) -> Result<(), Error> {
        info!("Refreshing access token");

        let refresh = self
            .current_refresh_token()
            .await
            .ok_or(AuthError::MissingRefreshToken)?;

        let request = RefreshTokenRequest {
            grant_type: REFRESH_TOKEN_GRANT,
            refresh_token: &refresh,
        };

        match self
            .http()
            .form_post::<_, TokenResponse>(IAM, OAUTH_TOKEN, &request)
            .await
        {
            Ok(response) => {
                self.apply_token_response(response).await;
                debug!("Session refreshed");
                Ok(())
            }
            Err(err) => {
                // A failed refresh leaves the old tokens unusable.
                self.clear_session().await;
                Err(err)
            }
        }
    }
}
