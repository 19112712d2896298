//! Prelude module for convenient imports.
//!
//! ```rust
//! use eklesiakonecta::prelude::*;
//! ```

pub use crate::{
    client::{Client, ClientBuilder, SCHEMA_HEADER},
    config::{ApiConfig, RequestOptions},
    error::{Error, ErrorKind, Result},
    session::{
        JsonFileStore, MemoryStore, Session, SessionProvider, SessionStore,
        StaticSessionProvider, StoreSessionProvider,
    },
};
