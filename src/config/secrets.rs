//! Secret handling utilities.
//!
//! Re-exports the secrecy types used for record store credentials.

pub use secrecy::{ExposeSecret, SecretString};
