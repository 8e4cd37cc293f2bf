//! Error types for the corbel library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authorization, protocol, decoding, and input validation errors.
//! Callers match on variants by kind; there are no sentinel values.

use std::fmt;
use thiserror::Error;

/// The unified error type for corbel operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authorization errors (assertion signing, token acquisition, upgrade).
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-2xx responses from the platform).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Response body decoding errors (malformed JSON, missing headers).
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (empty identifier, invalid endpoint URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authorization-related errors from the token subsystem.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signing the assertion failed. This is a configuration bug
    /// (bad algorithm/secret combination) and is never retried.
    #[error("assertion encoding failed: {message}")]
    AssertionEncoding { message: String },

    /// The token request could not complete. The caller cannot distinguish
    /// a network fault from a rejection here, so both surface as this.
    #[error("authorization failed: {message}")]
    Authorization { message: String },

    /// The upgrade endpoint rejected the token with 401.
    /// Terminal for that call; the caller must re-authenticate.
    #[error("not authorized")]
    NotAuthorized,

    /// A refresh was attempted with no refresh token in the session.
    #[error("no refresh token in session")]
    MissingRefreshToken,

    /// An authenticated operation was attempted with an empty session.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Protocol-level errors from non-2xx platform responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Platform error code (if present).
    pub error: Option<String>,
    /// Error description from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.error.as_deref() == Some("invalid_token")
    }
}

/// A response body that could not be decoded.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    /// What failed to decode.
    pub message: String,
}

impl DecodeError {
    /// Create a new decode error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A resource operation was given an empty identifier.
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    /// Invalid endpoint URL or template.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },
}
