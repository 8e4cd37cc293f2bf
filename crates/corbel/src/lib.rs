//! corbel - Client library for the Corbel platform
//!
//! This library talks to the platform's IAM service: it obtains access
//! tokens through signed-assertion OAuth grants, upgrades and refreshes
//! them, and manages user and group resources. All operations flow through
//! a [`Client`], which owns the identity configuration and the session
//! state the rest of the platform reads its bearer token from.
//!
//! # Example
//!
//! ```no_run
//! use corbel::{Client, ClientCredentials, Environment};
//!
//! # async fn example() -> Result<(), corbel::Error> {
//! let credentials = ClientCredentials::new("a9fb0e79", "client-secret")
//!     .with_domain("silkroad-qa")
//!     .with_name("test-client")
//!     .with_scopes(["iam:user:create", "iam:user:read"]);
//!
//! let client = Client::new(Environment::qa(), credentials);
//! client.acquire_token().await?;
//!
//! let users = client.user_search().eq("username", "corbel-rs").page(0).await?;
//! for user in users {
//!     println!("{}: {}", user.username, user.email);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod error;
pub mod http;
pub mod iam;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Algorithm, ClientCredentials};
pub use client::Client;
pub use error::{AuthError, DecodeError, Error, InvalidInputError, ProtocolError, TransportError};
pub use http::TokenResponse;
pub use iam::{IamGroup, IamUser, Search, SortOrder};
pub use types::Environment;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
