//! Client identity and session state.
//!
//! [`ClientCredentials`] is the immutable identity supplied at client
//! construction; the session (internal) is the mutable token state it
//! produces. Assertion signing lives here as well.

pub(crate) mod assertion;
mod credentials;
pub(crate) mod session;

pub use credentials::ClientCredentials;

// Signing algorithm selection is part of the public configuration surface.
pub use jsonwebtoken::Algorithm;
