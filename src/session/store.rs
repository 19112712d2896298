//! Key/value stores backing session resolution.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

/// Storage key for the current auth token.
pub const TOKEN_KEY: &str = "eklesiakonecta_token";

/// Legacy storage key for the auth token, still written by older login flows.
pub const LEGACY_TOKEN_KEY: &str = "auth_token";

/// Storage key holding the tenant schema directly.
pub const SCHEMA_KEY: &str = "church_schema";

/// Storage key holding the selected church as a JSON blob with a `schema` field.
pub const CHURCH_KEY: &str = "eklesiakonecta_igreja";

/// A read-only key/value store holding persisted session entries.
///
/// This is the SDK's stand-in for the persisted client-side storage the
/// login flow writes to. The SDK only ever reads it; writing and clearing
/// entries is the responsibility of the surrounding application.
///
/// ## Object Safety
///
/// This trait is object-safe and can be used as `Arc<dyn SessionStore>`.
pub trait SessionStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
}

impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// An in-memory session store.
///
/// Useful for tests and for applications that manage session entries
/// themselves. Writes go through [`set`](MemoryStore::set); the SDK itself
/// only reads.
///
/// ## Example
///
/// ```rust
/// use eklesiakonecta::session::{MemoryStore, SessionStore, TOKEN_KEY};
///
/// let store = MemoryStore::new();
/// store.set(TOKEN_KEY, "tok_123");
/// assert_eq!(store.get(TOKEN_KEY), Some("tok_123".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Removes the entry under `key`, if present.
    pub fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }
}

/// A session store backed by a flat JSON object on disk.
///
/// The file holds a single JSON object whose string fields are the entries,
/// mirroring how the browser front-end persists its session in local
/// storage. The file is re-read on every lookup so an external login or
/// logout flow rewriting it takes effect on the next request.
///
/// A missing, unreadable, or malformed file degrades to "no entries";
/// lookups never fail.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store reading from the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let entries: serde_json::Value = serde_json::from_str(&contents).ok()?;
        entries.get(key)?.as_str().map(str::to_owned)
    }
}
