//! HTTP transport and platform wire types.

mod client;
pub(crate) mod endpoints;

pub(crate) use client::HttpClient;
pub use endpoints::TokenResponse;
