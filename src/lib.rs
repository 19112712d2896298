//! # EklesiaKonecta Rust SDK
//!
//! Client SDK for the EklesiaKonecta church-management API.
//!
//! The backend is multi-tenant: every church lives in its own data
//! partition, selected per request by the `X-Church-Schema` header. This
//! crate is the single place that attaches auth and tenant context to
//! outgoing requests, so the header name and precedence rules cannot
//! diverge between call sites.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eklesiakonecta::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Celula {
//!     id: u32,
//!     nome: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> eklesiakonecta::Result<()> {
//!     let client = Client::builder()
//!         .config(ApiConfig::from_env()?)
//!         .session_provider(StoreSessionProvider::new(JsonFileStore::new("session.json")))
//!         .build()?;
//!
//!     let celulas: Vec<Celula> = client.get("/api/celulas").await?;
//!     println!("{} células", celulas.len());
//!
//!     client
//!         .download("/api/export", "relatorio.pdf", RequestOptions::new())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Session**: the (token, tenant schema) pair resolved from a
//!   [`SessionProvider`](session::SessionProvider) on every call, never
//!   cached between calls. Per-call overrides in
//!   [`RequestOptions`](config::RequestOptions) take precedence.
//! - **One call, one outcome**: the SDK never retries and never returns a
//!   partial result. Every failure is a structured [`Error`] with the HTTP
//!   status and body text as fields.
//! - **Deadlines**: each call runs under the client's default timeout or a
//!   per-call override; expiry surfaces as [`ErrorKind::Timeout`].
//!
//! ## Features
//!
//! - `rustls` (default): use rustls for TLS
//! - `native-tls`: use the platform TLS stack instead
//! - `tracing`: emit `tracing` events on request dispatch and failure

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod session;

mod user_agent;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, SCHEMA_HEADER};
pub use config::{ApiConfig, RequestOptions};
pub use error::{Error, ErrorKind, Result};
pub use session::{Session, SessionProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let _ = ErrorKind::Unauthorized;
    }
}
