//! Session resolution for tenant and auth context.
//!
//! Every request resolves a [`Session`] (token + tenant schema) through a
//! [`SessionProvider`] injected into the client. The default production
//! provider, [`StoreSessionProvider`], reads a [`SessionStore`] written by
//! the surrounding application's login flow; [`StaticSessionProvider`]
//! serves tests and externally-managed credentials.

mod provider;
mod store;

pub use provider::{Session, SessionProvider, StaticSessionProvider, StoreSessionProvider};
pub use store::{
    CHURCH_KEY, JsonFileStore, LEGACY_TOKEN_KEY, MemoryStore, SCHEMA_KEY, SessionStore, TOKEN_KEY,
};
