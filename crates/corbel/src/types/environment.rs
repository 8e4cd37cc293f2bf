//! Platform environment and endpoint resolution.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Endpoint template for the production environment.
const PRODUCTION_TEMPLATE: &str = "https://{service}.bqws.io";

/// Endpoint template for the QA environment.
const QA_TEMPLATE: &str = "https://{service}-qa.bqws.io";

/// Endpoint template for the integration environment.
const INTEGRATION_TEMPLATE: &str = "https://{service}-int.bqws.io";

/// A validated endpoint template identifying a platform deployment.
///
/// Each platform service (iam, resources, assets, ...) is reachable at a
/// per-environment host. An `Environment` holds the host template and
/// resolves `(service, path)` pairs to absolute URLs.
///
/// # Example
///
/// ```
/// use corbel::Environment;
///
/// let env = Environment::qa();
/// assert_eq!(
///     env.url_for("iam", "/v1.0/oauth/token"),
///     "https://iam-qa.bqws.io/v1.0/oauth/token"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Environment {
    template: String,
}

impl Environment {
    /// The production environment.
    pub fn production() -> Self {
        Self {
            template: PRODUCTION_TEMPLATE.to_string(),
        }
    }

    /// The QA environment.
    pub fn qa() -> Self {
        Self {
            template: QA_TEMPLATE.to_string(),
        }
    }

    /// The integration environment.
    pub fn integration() -> Self {
        Self {
            template: INTEGRATION_TEMPLATE.to_string(),
        }
    }

    /// Create an environment from a custom endpoint template.
    ///
    /// The template may contain a `{service}` placeholder in the host;
    /// without one, every service resolves to the same base URL, which is
    /// what self-hosted single-endpoint deployments (and tests) use.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is not an absolute HTTPS URL
    /// (HTTP is allowed only for localhost).
    pub fn custom(template: impl AsRef<str>) -> Result<Self, Error> {
        let template = template.as_ref();
        let resolved = template.replace("{service}", "iam");
        let url = Url::parse(&resolved).map_err(|e| InvalidInputError::Endpoint {
            value: template.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, template)?;

        Ok(Self {
            template: template.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the absolute URL for a service path.
    ///
    /// `path` is expected to start with `/`, e.g. `/v1.0/oauth/token`.
    pub fn url_for(&self, service: &str, path: &str) -> String {
        let base = self.template.replace("{service}", service);
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    /// Returns the endpoint template string.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::production()),
            "qa" => Ok(Self::qa()),
            "int" | "integration" => Ok(Self::integration()),
            other => Self::custom(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_url_resolution() {
        let env = Environment::production();
        assert_eq!(
            env.url_for("iam", "/v1.0/oauth/token"),
            "https://iam.bqws.io/v1.0/oauth/token"
        );
    }

    #[test]
    fn qa_url_resolution_substitutes_service() {
        let env = Environment::qa();
        assert_eq!(
            env.url_for("resources", "/v1.0/resource"),
            "https://resources-qa.bqws.io/v1.0/resource"
        );
    }

    #[test]
    fn custom_template_without_placeholder() {
        let env = Environment::custom("http://127.0.0.1:2583").unwrap();
        assert_eq!(
            env.url_for("iam", "/v1.0/oauth/token"),
            "http://127.0.0.1:2583/v1.0/oauth/token"
        );
    }

    #[test]
    fn custom_template_trims_trailing_slash() {
        let env = Environment::custom("http://localhost:2583/").unwrap();
        assert_eq!(env.url_for("iam", "/x"), "http://localhost:2583/x");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(Environment::custom("http://iam.bqws.io").is_err());
    }

    #[test]
    fn invalid_relative_template() {
        assert!(Environment::custom("/v1.0/oauth").is_err());
    }

    #[test]
    fn from_str_named_environments() {
        assert_eq!("qa".parse::<Environment>().unwrap(), Environment::qa());
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::production()
        );
        assert_eq!(
            "int".parse::<Environment>().unwrap(),
            Environment::integration()
        );
    }
}
