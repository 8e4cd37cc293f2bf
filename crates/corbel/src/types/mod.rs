//! Core platform types.

mod environment;

pub use environment::Environment;
