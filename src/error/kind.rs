//! Error kind enumeration for categorizing SDK errors.

/// Categorization of SDK errors.
///
/// This enum provides a stable interface for matching on error types, enabling
/// different handling strategies for different failure modes. The SDK itself
/// never retries; [`is_retriable`](ErrorKind::is_retriable) is a hint for
/// callers that want to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Authentication failed (missing, invalid, or expired token).
    ///
    /// HTTP: 401 Unauthorized
    ///
    /// **Not retriable.** Re-authenticate and retry.
    #[error("unauthorized")]
    Unauthorized,

    /// Authorization failed (valid token but insufficient permissions,
    /// or a tenant schema the token has no access to).
    ///
    /// HTTP: 403 Forbidden
    ///
    /// **Not retriable.** Fix permissions and retry.
    #[error("forbidden")]
    Forbidden,

    /// Requested resource was not found.
    ///
    /// HTTP: 404 Not Found
    ///
    /// **Not retriable.** The resource doesn't exist.
    #[error("not found")]
    NotFound,

    /// Invalid request argument or payload (validation failures included).
    ///
    /// HTTP: 400 Bad Request, 422 Unprocessable Entity
    ///
    /// **Not retriable.** Fix the input and retry.
    #[error("invalid argument")]
    InvalidArgument,

    /// Conflict with existing resource state.
    ///
    /// HTTP: 409 Conflict
    ///
    /// **Conditionally retriable** after resolving the conflict.
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    ///
    /// **Retriable** after backing off.
    #[error("rate limited")]
    RateLimited,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 503 Service Unavailable
    ///
    /// **Retriable.** Retry with backoff.
    #[error("service unavailable")]
    Unavailable,

    /// Request timed out (server-side gateway timeout, or the per-call
    /// deadline expired client-side).
    ///
    /// HTTP: 504 Gateway Timeout or client-side deadline
    ///
    /// **Retriable.** Retry with backoff.
    #[error("timeout")]
    Timeout,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error
    ///
    /// **Not retriable** by default. May indicate a bug on the server.
    #[error("internal error")]
    Internal,

    /// Connection error (DNS, TLS handshake, network unreachable).
    ///
    /// **Retriable.** May indicate transient network issues.
    #[error("connection error")]
    Connection,

    /// Invalid response from server (unparseable body, unexpected
    /// content type on a JSON endpoint).
    ///
    /// **Not retriable** without a server-side fix.
    #[error("invalid response")]
    InvalidResponse,

    /// Configuration error (invalid URL, missing base URL).
    ///
    /// **Not retriable.** Fix the configuration.
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    ///
    /// Used as a catch-all for unrecognized status codes.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if this error kind is generally safe to retry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eklesiakonecta::ErrorKind;
    ///
    /// assert!(ErrorKind::Timeout.is_retriable());
    /// assert!(!ErrorKind::Unauthorized.is_retriable());
    /// ```
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Unavailable
                | ErrorKind::Timeout
                | ErrorKind::RateLimited
                | ErrorKind::Connection
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    ///
    /// Unmapped 4xx codes fall back to `InvalidArgument`, unmapped 5xx
    /// codes to `Internal`, anything else to `Unknown`.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            503 => ErrorKind::Unavailable,
            504 => ErrorKind::Timeout,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}
