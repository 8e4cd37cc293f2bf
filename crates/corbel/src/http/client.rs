//! HTTP client for platform requests.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::error::{DecodeError, Error, ProtocolError};
use crate::types::Environment;

use super::endpoints::ApiErrorResponse;

/// HTTP transport shared by all platform operations.
///
/// Built once at client construction and injected into the client context;
/// there is no process-wide shared instance. Carries a fixed `User-Agent`.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    environment: Environment,
}

impl HttpClient {
    /// Create a new transport for the given environment.
    pub(crate) fn new(environment: Environment) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("corbel/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            environment,
        }
    }

    /// Returns the environment this transport resolves URLs against.
    pub(crate) fn environment(&self) -> &Environment {
        &self.environment
    }

    /// POST with a form-encoded body (token endpoints).
    #[instrument(skip(self, form), fields(environment = %self.environment))]
    pub(crate) async fn form_post<B, R>(
        &self,
        service: &str,
        path: &str,
        form: &B,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "form POST");

        let response = self.client.post(&url).form(form).send().await?;

        self.handle_response(response).await
    }

    /// GET with a form-encoded body.
    ///
    /// A GET carrying a body is a quirk of the platform's token-upgrade
    /// endpoint, not a general HTTP pattern.
    #[instrument(skip(self, form), fields(environment = %self.environment))]
    pub(crate) async fn form_get<B, R>(
        &self,
        service: &str,
        path: &str,
        form: &B,
    ) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "form GET");

        let response = self.client.get(&url).form(form).send().await?;

        self.handle_response(response).await
    }

    /// Authenticated GET.
    #[instrument(skip(self, token), fields(environment = %self.environment))]
    pub(crate) async fn get_authed<R>(
        &self,
        service: &str,
        path: &str,
        token: &str,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "authenticated GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Authenticated GET with query parameters (search endpoints).
    #[instrument(skip(self, query, token), fields(environment = %self.environment))]
    pub(crate) async fn query_authed<Q, R>(
        &self,
        service: &str,
        path: &str,
        query: &Q,
        token: &str,
    ) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "authenticated query");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Authenticated POST creating a resource.
    ///
    /// The platform returns the new resource in the `Location` header with
    /// an empty body; the identifier is the last path segment.
    #[instrument(skip(self, body, token), fields(environment = %self.environment))]
    pub(crate) async fn post_authed_created<B>(
        &self,
        service: &str,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<String, Error>
    where
        B: Serialize,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "authenticated POST (create)");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = self.parse_error_response(response).await;
            return Err(Error::Protocol(error));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DecodeError::new("create response missing Location header"))?;

        let id = location.rsplit('/').next().unwrap_or(location);
        Ok(id.to_string())
    }

    /// Authenticated PUT with no response body.
    #[instrument(skip(self, body, token), fields(environment = %self.environment))]
    pub(crate) async fn put_authed_no_response<B>(
        &self,
        service: &str,
        path: &str,
        body: &B,
        token: &str,
    ) -> Result<(), Error>
    where
        B: Serialize,
    {
        let url = self.environment.url_for(service, path);
        debug!(%url, "authenticated PUT");

        let response = self
            .client
            .put(&url)
            .json(body)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    /// Authenticated DELETE.
    #[instrument(skip(self, token), fields(environment = %self.environment))]
    pub(crate) async fn delete_authed(
        &self,
        service: &str,
        path: &str,
        token: &str,
    ) -> Result<(), Error> {
        let url = self.environment.url_for(service, path);
        debug!(%url, "authenticated DELETE");

        let response = self
            .client
            .delete(&url)
            .headers(self.auth_headers(token))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(&self, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a platform response, decoding the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "platform response");

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body)
                .map_err(|e| DecodeError::new(format!("malformed response body: {}", e)).into())
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Protocol(error))
        }
    }

    /// Parse a platform error response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        // Try to parse as the platform error format
        match response.json::<ApiErrorResponse>().await {
            Ok(body) => ProtocolError::new(status, body.error, body.error_description),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let env = Environment::qa();
        let client = HttpClient::new(env.clone());
        assert_eq!(client.environment().as_str(), env.as_str());
    }
}
