//! Platform endpoint definitions and wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Services and paths
// ============================================================================

/// The IAM service name, resolved through the environment template.
pub(crate) const IAM: &str = "iam";

/// Token endpoint path.
pub(crate) const OAUTH_TOKEN: &str = "/v1.0/oauth/token";

/// Token upgrade endpoint path.
pub(crate) const OAUTH_TOKEN_UPGRADE: &str = "/v1.0/oauth/token/upgrade";

/// User resource path.
pub(crate) const USER: &str = "/v1.0/user";

/// Group resource path.
pub(crate) const GROUP: &str = "/v1.0/group";

// ============================================================================
// Grants
// ============================================================================

/// Grant type for signed-assertion token requests.
pub(crate) const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Grant type for refresh-token exchanges.
pub(crate) const REFRESH_TOKEN_GRANT: &str = "refresh_token";

// ============================================================================
// Wire types
// ============================================================================

/// Form body for assertion-grant token requests.
#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'a str,
    pub assertion: &'a str,
}

/// Form body for refresh-token exchanges.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshTokenRequest<'a> {
    pub grant_type: &'a str,
    pub refresh_token: &'a str,
}

/// Response from the token and token-upgrade endpoints.
///
/// All fields are optional on the wire. A 200 with a missing or empty
/// `accessToken` is a documented outcome of basic-auth grants whose
/// credentials matched no account, not a protocol failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The issued access token, if any.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Absolute expiry of the access token, epoch milliseconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// The issued refresh token, if any.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenResponse {
    /// Returns the expiry as a UTC timestamp, when present and valid.
    pub fn expires_at_utc(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.expires_at
            .and_then(|millis| chrono::DateTime::from_timestamp_millis(millis))
    }
}

/// Error response format of the platform.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: Option<String>,
    #[serde(rename = "errorDescription")]
    pub error_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_tolerates_empty_body() {
        let response: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(response.access_token.is_none());
        assert!(response.expires_at.is_none());
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn token_response_expiry_is_milliseconds() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"accessToken":"t","expiresAt":1735689600000}"#).unwrap();
        let expiry = response.expires_at_utc().unwrap();
        assert_eq!(expiry.timestamp(), 1_735_689_600);
    }
}
