//! Builder for [`Client`].

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::client::Client;
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::{SessionProvider, StaticSessionProvider};
use crate::user_agent;

/// Builder for creating [`Client`] instances.
///
/// The base URL is required; everything else has defaults. Without a
/// session provider the client resolves an anonymous session, which is
/// valid for unauthenticated endpoints.
///
/// ## Example
///
/// ```rust,ignore
/// use eklesiakonecta::{ApiConfig, Client};
/// use eklesiakonecta::session::{MemoryStore, StoreSessionProvider};
///
/// let client = Client::builder()
///     .config(ApiConfig::from_env()?)
///     .session_provider(StoreSessionProvider::new(MemoryStore::new()))
///     .build()?;
/// ```
pub struct ClientBuilder {
    base_url: Option<String>,
    session: Option<Arc<dyn SessionProvider>>,
    timeout: Duration,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            base_url: None,
            session: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API base URL, e.g. `https://api.eklesiakonecta.com`.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Applies an [`ApiConfig`] (base URL and default timeout).
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.base_url = Some(config.base_url);
        self.timeout = config.timeout;
        self
    }

    /// Sets the session provider consulted on every request.
    #[must_use]
    pub fn session_provider(mut self, provider: impl SessionProvider + 'static) -> Self {
        self.session = Some(Arc::new(provider));
        self
    }

    /// Sets the default per-request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is missing or invalid,
    /// or if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::configuration("base URL is required; set base_url() or config()"))?;
        let base_url = Url::parse(&base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "base URL {:?} cannot serve as an API origin",
                base_url.as_str()
            )));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .user_agent(user_agent::user_agent())
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {}", e)))?;

        let session = self
            .session
            .unwrap_or_else(|| Arc::new(StaticSessionProvider::anonymous()));

        Ok(Client::new(http, base_url, session, self.timeout))
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
