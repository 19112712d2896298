//! Main error type for the EklesiaKonecta SDK.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for EklesiaKonecta SDK operations.
///
/// `Error` carries structured context so callers can branch without
/// parsing message strings:
/// - [`kind()`](Error::kind): categorization for `match` statements
/// - [`status()`](Error::status): the HTTP status code, when one was received
/// - [`body_text()`](Error::body_text): the error body text, when it was read
///
/// ## Example
///
/// ```rust
/// use eklesiakonecta::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> &'static str {
///     match err.kind() {
///         ErrorKind::Unauthorized => "please log in again",
///         ErrorKind::InvalidArgument => "check the submitted form",
///         kind if kind.is_retriable() => "temporary problem, try again",
///         _ => "something went wrong",
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    /// The error category.
    kind: ErrorKind,

    /// Human-readable error message.
    message: Cow<'static, str>,

    /// HTTP status code, when the server responded with one.
    status: Option<u16>,

    /// Response body text, when it was read off a failed response.
    body_text: Option<String>,

    /// The underlying error, if any.
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use eklesiakonecta::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Configuration, "base URL is not set");
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body_text: None,
            source: None,
        }
    }

    /// Creates an error from a non-success HTTP response.
    ///
    /// The message embeds the numeric status and either the body text
    /// (when present and non-empty) or the canonical reason phrase, in the
    /// form `HTTP <status> - <detail>`. The status and body text remain
    /// individually accessible via [`status()`](Error::status) and
    /// [`body_text()`](Error::body_text).
    pub fn http_status(status: u16, body_text: Option<String>, reason: &str) -> Self {
        let detail = body_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(reason);
        let message = if detail.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {} - {}", status, detail)
        };
        Self {
            kind: ErrorKind::from_http_status(status),
            message: message.into(),
            status: Some(status),
            body_text: body_text.filter(|text| !text.is_empty()),
            source: None,
        }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code, if the server responded with one.
    ///
    /// `None` for errors raised before a status was available (connection
    /// failures, deadline expiry, configuration problems).
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the error body text, if it was read off the failed response.
    ///
    /// Download failures do not read the body, so this is `None` for them
    /// even when a status is present.
    #[inline]
    pub fn body_text(&self) -> Option<&str> {
        self.body_text.as_deref()
    }

    /// Returns the human-readable message.
    ///
    /// For HTTP status errors this is the `HTTP <status> - <detail>` form.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if this error is generally safe to retry.
    ///
    /// Equivalent to `self.kind().is_retriable()`.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for common error types

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// Implement From for common error types

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Connection,
            std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
            _ => ErrorKind::Internal,
        };
        Error::new(kind, err.to_string()).with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::invalid_response(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let mapped = if err.is_timeout() {
            Error::timeout(format!("request timed out: {}", err))
        } else if err.is_connect() {
            Error::connection(format!("connection failed: {}", err))
        } else if err.is_request() {
            Error::new(ErrorKind::InvalidArgument, format!("invalid request: {}", err))
        } else if err.is_decode() {
            Error::invalid_response(format!("failed to decode response: {}", err))
        } else {
            Error::connection(format!("HTTP transport error: {}", err))
        };
        mapped.with_source(err)
    }
}
