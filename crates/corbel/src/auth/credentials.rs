//! Client identity configuration.

use std::fmt;

use chrono::TimeDelta;
use jsonwebtoken::Algorithm;

/// Default lifetime of a signed assertion (one hour).
const DEFAULT_ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Immutable identity of a platform client.
///
/// Holds everything needed to build and sign assertion grants: the client ID
/// and secret issued by the platform, the signing algorithm, the scopes to
/// request, the domain the client lives in, its display name, and how long
/// each signed assertion stays valid. Supplied at [`Client`] construction and
/// never mutated afterwards.
///
/// # Security
///
/// The client secret is never exposed in Debug output.
///
/// # Example
///
/// ```
/// use corbel::ClientCredentials;
///
/// let credentials = ClientCredentials::new("a9fb0e79", "client-secret")
///     .with_domain("silkroad-qa")
///     .with_name("test-client")
///     .with_scopes(["iam:user:create", "iam:user:read"]);
/// assert_eq!(credentials.client_id(), "a9fb0e79");
/// ```
///
/// [`Client`]: crate::Client
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: String,
    algorithm: Algorithm,
    scopes: Vec<String>,
    domain: String,
    name: String,
    assertion_lifetime: TimeDelta,
}

impl ClientCredentials {
    /// Create credentials for a client ID and secret.
    ///
    /// Defaults: HS256 signing, no scopes, empty domain and name, one-hour
    /// assertion lifetime. Use the `with_*` methods to adjust.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            algorithm: Algorithm::HS256,
            scopes: Vec::new(),
            domain: String::new(),
            name: String::new(),
            assertion_lifetime: TimeDelta::seconds(DEFAULT_ASSERTION_LIFETIME_SECS),
        }
    }

    /// Sets the signing algorithm for assertions.
    ///
    /// The platform issues shared secrets, so only the HMAC family is
    /// meaningful here; an incompatible algorithm surfaces as an assertion
    /// encoding error at signing time.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the scopes requested in each assertion.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the domain the client belongs to.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the client display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets how long each signed assertion stays valid.
    pub fn with_assertion_lifetime(mut self, lifetime: TimeDelta) -> Self {
        self.assertion_lifetime = lifetime;
        self
    }

    /// Returns the client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when signing assertions. Never log or display it.
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the signing algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the requested scopes.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Returns the client domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the client display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the assertion lifetime.
    pub fn assertion_lifetime(&self) -> TimeDelta {
        self.assertion_lifetime
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("scopes", &self.scopes)
            .field("domain", &self.domain)
            .field("name", &self.name)
            .field("assertion_lifetime", &self.assertion_lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_secret_in_debug() {
        let creds = ClientCredentials::new("a9fb0e79", "super-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a9fb0e79"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn builder_methods_apply() {
        let creds = ClientCredentials::new("id", "secret")
            .with_domain("silkroad-qa")
            .with_name("test-client")
            .with_scopes(["a", "b"])
            .with_assertion_lifetime(TimeDelta::seconds(10));

        assert_eq!(creds.domain(), "silkroad-qa");
        assert_eq!(creds.name(), "test-client");
        assert_eq!(creds.scopes(), ["a", "b"]);
        assert_eq!(creds.assertion_lifetime(), TimeDelta::seconds(10));
        assert_eq!(creds.algorithm(), Algorithm::HS256);
    }
}
