//! Per-call request options.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::Result;

/// Options applied to a single request.
///
/// All fields are optional; `RequestOptions::new()` yields a plain GET with
/// the client's defaults. Options are never persisted and never shared
/// between calls.
///
/// The `token` and `schema` fields override the resolved session for this
/// call only; the ambient session remains the default when they are unset.
///
/// ## Example
///
/// ```rust
/// use eklesiakonecta::RequestOptions;
/// use reqwest::Method;
/// use std::time::Duration;
///
/// let options = RequestOptions::new()
///     .with_method(Method::POST)
///     .with_schema("igreja_x")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method; GET when unset.
    pub method: Option<Method>,

    /// Extra headers, overlaid on the client's defaults. A caller-supplied
    /// `Content-Type` replaces the default `application/json`.
    pub headers: HeaderMap,

    /// Request body, passed through verbatim. Callers are responsible for
    /// serializing; see [`with_json`](RequestOptions::with_json).
    pub body: Option<Bytes>,

    /// Explicit auth token for this call, overriding the session provider.
    pub token: Option<String>,

    /// Explicit tenant schema for this call, overriding the session provider.
    pub schema: Option<String>,

    /// Per-call deadline, overriding the client's default timeout.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options: GET, no extra headers, no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a header, replacing any previous value under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `body` as JSON and sets it as the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Sets an explicit auth token for this call.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets an explicit tenant schema for this call.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets a per-call deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
