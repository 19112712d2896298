//! Error types for the EklesiaKonecta SDK.
//!
//! All fallible SDK operations return [`Result<T>`]. The [`Error`] type
//! carries an [`ErrorKind`] plus the HTTP status and body text as structured
//! fields, so callers never need to parse message strings.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Convenience alias for SDK results.
pub type Result<T> = std::result::Result<T, Error>;
