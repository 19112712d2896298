//! API endpoint configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const BASE_URL_ENV: &str = "EKLESIA_API_URL";

/// Configuration for reaching the EklesiaKonecta backend.
///
/// The base URL is environment-sensitive in deployments: a development
/// setup typically points at a local proxy while production uses a fixed
/// origin. [`ApiConfig::from_env`] reads it from `EKLESIA_API_URL`.
///
/// ## Example
///
/// ```rust
/// use eklesiakonecta::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::builder()
///     .base_url("https://api.eklesiakonecta.com")
///     .timeout(Duration::from_secs(10))
///     .build();
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ApiConfig {
    /// The API origin, e.g. `https://api.eklesiakonecta.com`.
    ///
    /// Validated when the client is built.
    #[builder(into)]
    pub base_url: String,

    /// Default per-request deadline. Individual calls may override it via
    /// `RequestOptions::timeout`.
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration with the given base URL and default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder().base_url(base_url.into()).build()
    }

    /// Creates a configuration from the `EKLESIA_API_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("environment variable {} is not set", BASE_URL_ENV))
            })?;
        Ok(Self::new(base_url))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ApiConfig::builder().base_url("http://localhost:3000").build();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_new() {
        let config = ApiConfig::new("https://api.example.com");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_builder_timeout() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:3000")
            .timeout(Duration::from_secs(5))
            .build();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
