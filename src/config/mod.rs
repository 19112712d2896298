//! Configuration types for the EklesiaKonecta SDK.
//!
//! - [`ApiConfig`]: base URL and default timeout for a client
//! - [`RequestOptions`]: per-call method, headers, body, session overrides

mod api;
mod options;

pub use api::{ApiConfig, BASE_URL_ENV};
pub use options::RequestOptions;
