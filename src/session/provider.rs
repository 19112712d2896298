//! Session resolution: producing the (token, schema) pair attached to requests.

use std::sync::Arc;

use super::store::{CHURCH_KEY, LEGACY_TOKEN_KEY, SCHEMA_KEY, SessionStore, TOKEN_KEY};

/// A resolved session: the auth token and tenant schema attached to requests.
///
/// Either field may be absent. The session is not validated, refreshed, or
/// expired by the SDK; it is re-resolved on every call and trusted as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// The bearer token, sent as `Authorization: Bearer <token>` when present.
    pub token: Option<String>,

    /// The tenant schema, sent as `X-Church-Schema: <schema>` when present.
    pub schema: Option<String>,
}

impl Session {
    /// Creates a session with the given token and schema.
    pub fn new(token: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            schema: Some(schema.into()),
        }
    }

    /// Creates an empty session with neither token nor schema.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns `true` if a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Trait for resolving the applied session dynamically.
///
/// The client calls [`resolve`](SessionProvider::resolve) on every request,
/// so an implementation backed by mutable storage picks up logins and
/// logouts without rebuilding the client. Resolution is synchronous and
/// must not perform network access.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn SessionProvider>`.
///
/// ## Example: environment-backed provider
///
/// ```rust
/// use eklesiakonecta::session::{Session, SessionProvider};
///
/// struct EnvSessionProvider;
///
/// impl SessionProvider for EnvSessionProvider {
///     fn resolve(&self) -> Session {
///         Session {
///             token: std::env::var("EKLESIA_TOKEN").ok(),
///             schema: std::env::var("EKLESIA_SCHEMA").ok(),
///         }
///     }
/// }
/// ```
pub trait SessionProvider: Send + Sync {
    /// Returns the best-available session for the next request.
    ///
    /// Absent credentials are not an error; an application talking to
    /// unauthenticated endpoints resolves an anonymous session.
    fn resolve(&self) -> Session;
}

impl<T: SessionProvider + ?Sized> SessionProvider for Arc<T> {
    fn resolve(&self) -> Session {
        (**self).resolve()
    }
}

impl<T: SessionProvider + ?Sized> SessionProvider for Box<T> {
    fn resolve(&self) -> Session {
        (**self).resolve()
    }
}

/// A provider that always returns the same session.
///
/// Useful for tests and for applications that manage credentials
/// externally and hand the SDK a fixed pair.
#[derive(Debug, Clone)]
pub struct StaticSessionProvider {
    session: Session,
}

impl StaticSessionProvider {
    /// Creates a provider returning the given session.
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Creates a provider resolving an empty session.
    pub fn anonymous() -> Self {
        Self::new(Session::anonymous())
    }
}

impl SessionProvider for StaticSessionProvider {
    fn resolve(&self) -> Session {
        self.session.clone()
    }
}

/// A provider that resolves the session from a [`SessionStore`] on each call.
///
/// Resolution precedence per field:
///
/// | Field  | Primary key            | Fallback                                      |
/// |--------|------------------------|-----------------------------------------------|
/// | token  | `eklesiakonecta_token` | `auth_token` (plain string)                   |
/// | schema | `church_schema`        | `eklesiakonecta_igreja` JSON blob, `.schema`  |
///
/// A malformed church blob degrades silently to "no schema": a corrupted or
/// partially-written tenant entry must never block token resolution or fail
/// a request that only needs the token.
#[derive(Debug, Clone)]
pub struct StoreSessionProvider<S> {
    store: S,
}

impl<S: SessionStore> StoreSessionProvider<S> {
    /// Creates a provider reading from the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SessionStore> SessionProvider for StoreSessionProvider<S> {
    fn resolve(&self) -> Session {
        let token = self
            .store
            .get(TOKEN_KEY)
            .or_else(|| self.store.get(LEGACY_TOKEN_KEY));
        let schema = self.store.get(SCHEMA_KEY).or_else(|| {
            self.store
                .get(CHURCH_KEY)
                .and_then(|blob| schema_from_church_blob(&blob))
        });
        Session { token, schema }
    }
}

/// Extracts the `schema` field from a persisted church JSON blob.
///
/// Returns `None` when the blob is not valid JSON or has no string `schema`
/// field. The tolerance is part of the contract, hence the `Option` return
/// rather than a `Result`.
fn schema_from_church_blob(blob: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(blob).ok()?;
    value.get("schema")?.as_str().map(str::to_owned)
}
