//! Signed-assertion construction for the OAuth assertion grant.
//!
//! Assertions are short-lived JWTs asserting the client identity, built
//! fresh for every token request, signed with the client secret, and
//! discarded after encoding. The claim set is a fixed structured record;
//! it is serialized only here, at the signing boundary.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use crate::auth::ClientCredentials;
use crate::error::{AuthError, Error};

/// Audience required by the IAM token endpoint.
pub(crate) const IAM_AUDIENCE: &str = "http://iam.bqws.io";

/// Claim set of a signed assertion.
///
/// `exp` is epoch milliseconds, which is what the platform expects.
/// The `basic_auth.*` claims are present only for user-credential grants.
#[derive(Serialize)]
struct AssertionClaims<'a> {
    aud: &'a str,
    exp: i64,
    iss: &'a str,
    scope: String,
    domain: &'a str,
    name: &'a str,
    #[serde(rename = "basic_auth.username", skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(rename = "basic_auth.password", skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

/// Build and sign an assertion for the given client identity.
///
/// Empty `username`/`password` mean a client-credentials-only grant; the
/// corresponding claims are omitted entirely rather than sent empty.
///
/// # Errors
///
/// Returns [`AuthError::AssertionEncoding`] if signing fails. That is a
/// configuration bug (algorithm/secret mismatch) and is never retried.
pub(crate) fn sign_assertion(
    credentials: &ClientCredentials,
    username: &str,
    password: &str,
) -> Result<String, Error> {
    let expiry = Utc::now() + credentials.assertion_lifetime();

    let claims = AssertionClaims {
        aud: IAM_AUDIENCE,
        exp: expiry.timestamp_millis(),
        iss: credentials.client_id(),
        scope: credentials.scopes().join(" "),
        domain: credentials.domain(),
        name: credentials.name(),
        username: (!username.is_empty()).then_some(username),
        password: (!password.is_empty()).then_some(password),
    };

    let header = Header::new(credentials.algorithm());
    let key = EncodingKey::from_secret(credentials.client_secret().as_bytes());

    encode(&header, &claims, &key).map_err(|e| {
        AuthError::AssertionEncoding {
            message: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use jsonwebtoken::{Algorithm, DecodingKey, Validation};

    fn test_credentials() -> ClientCredentials {
        ClientCredentials::new("a9fb0e79", "test-secret")
            .with_domain("silkroad-qa")
            .with_name("test-client")
            .with_scopes(["iam:user:create", "iam:user:read"])
            .with_assertion_lifetime(TimeDelta::seconds(10))
    }

    fn decode_claims(token: &str) -> serde_json::Value {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        validation.set_audience(&[IAM_AUDIENCE]);
        jsonwebtoken::decode::<serde_json::Value>(
            token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .unwrap()
        .claims
    }

    #[test]
    fn assertion_has_three_segments() {
        let token = sign_assertion(&test_credentials(), "", "").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn client_grant_omits_basic_auth_claims() {
        let token = sign_assertion(&test_credentials(), "", "").unwrap();
        let claims = decode_claims(&token);

        assert_eq!(claims["aud"], IAM_AUDIENCE);
        assert_eq!(claims["iss"], "a9fb0e79");
        assert_eq!(claims["scope"], "iam:user:create iam:user:read");
        assert_eq!(claims["domain"], "silkroad-qa");
        assert_eq!(claims["name"], "test-client");
        assert!(claims.get("basic_auth.username").is_none());
        assert!(claims.get("basic_auth.password").is_none());
    }

    #[test]
    fn basic_auth_grant_carries_credentials() {
        let token = sign_assertion(&test_credentials(), "alice", "hunter2").unwrap();
        let claims = decode_claims(&token);
        assert_eq!(claims["basic_auth.username"], "alice");
        assert_eq!(claims["basic_auth.password"], "hunter2");
    }

    #[test]
    fn expiry_is_epoch_milliseconds() {
        let token = sign_assertion(&test_credentials(), "", "").unwrap();
        let claims = decode_claims(&token);
        let exp = claims["exp"].as_i64().unwrap();
        // A millisecond timestamp near now is three orders of magnitude
        // larger than a second timestamp.
        let now_millis = Utc::now().timestamp_millis();
        assert!(exp > now_millis);
        assert!(exp < now_millis + 60_000);
    }

    #[test]
    fn incompatible_algorithm_is_an_encoding_error() {
        let creds = test_credentials().with_algorithm(Algorithm::RS256);
        let err = sign_assertion(&creds, "", "").unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(AuthError::AssertionEncoding { .. })
        ));
    }
}
