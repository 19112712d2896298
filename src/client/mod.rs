//! The request executor: tenant-aware HTTP access to the backend.
//!
//! [`Client`] is the single place that attaches auth and tenant context to
//! outgoing requests. Every call resolves the ambient [`Session`] through
//! the injected provider, applies any per-call overrides, and issues one
//! best-effort request: no retries, no recovery, every failure surfaces to
//! the caller as an [`Error`].
//!
//! [`Session`]: crate::session::Session

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::RequestOptions;
use crate::error::{Error, ErrorKind, Result};
use crate::session::SessionProvider;

mod builder;
mod download;

pub use builder::ClientBuilder;

/// Wire name of the tenant schema header (`X-Church-Schema`).
///
/// The backend partitions data per church on this header. It is asserted
/// here and nowhere else; all requests go through [`Client`], so the name
/// cannot diverge between call sites.
pub const SCHEMA_HEADER: &str = "x-church-schema";

/// Client for the EklesiaKonecta API.
///
/// Cheap to clone; clones share the underlying connection pool and session
/// provider. Requests are issued with a cookie store enabled, since the
/// backend may use cookie-based auth alongside the tenant headers.
///
/// ## Example
///
/// ```rust,ignore
/// use eklesiakonecta::{Client, RequestOptions};
/// use eklesiakonecta::session::{JsonFileStore, StoreSessionProvider};
///
/// let client = Client::builder()
///     .base_url("https://api.eklesiakonecta.com")
///     .session_provider(StoreSessionProvider::new(JsonFileStore::new("session.json")))
///     .build()?;
///
/// let celulas: Vec<Celula> = client.get("/api/celulas").await?;
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionProvider>,
    timeout: Duration,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn new(
        http: reqwest::Client,
        base_url: Url,
        session: Arc<dyn SessionProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url,
            session,
            timeout,
        }
    }

    /// Issues a request and deserializes the JSON response body.
    ///
    /// The response shape is the caller's concern; the backend returns a
    /// different shape per endpoint, so each call site supplies its own `T`.
    /// A 2xx response with a non-JSON content type is an
    /// [`ErrorKind::InvalidResponse`] error; use [`execute`](Client::execute)
    /// for endpoints that return raw bodies.
    ///
    /// # Errors
    ///
    /// - non-2xx status: error with the status and best-effort body text
    /// - transport failure or expired deadline
    /// - undeserializable body
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let response = self.execute(path, options).await?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        if !is_json {
            return Err(Error::invalid_response(
                "expected an application/json response; use execute() for raw bodies",
            ));
        }
        response.json::<T>().await.map_err(Error::from)
    }

    /// Issues a request and returns the status-checked raw response.
    ///
    /// Same header and session handling as [`request`](Client::request), but
    /// the body is left for the caller to read as text or bytes. This is the
    /// entry point for endpoints that do not return JSON.
    ///
    /// # Errors
    ///
    /// Non-2xx statuses become errors exactly as in [`request`](Client::request);
    /// the returned response is always a success response.
    pub async fn execute(&self, path: &str, options: RequestOptions) -> Result<Response> {
        let url = self.endpoint(path)?;
        let method = options.method.clone().unwrap_or(Method::GET);
        let headers = self.build_headers(&options, true)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(method = %method, url = %url, "dispatching API request");

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = options.body.clone() {
            request = request.body(body);
        }

        // The per-request timeout covers the full call, including body
        // reads: a server that sends headers and then stalls the body still
        // fails at the deadline.
        let deadline = options.timeout.unwrap_or(self.timeout);
        let response = request.timeout(deadline).send().await?;

        self.check_status(response).await
    }

    /// GET `path` and deserialize the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::new()).await
    }

    /// POST `body` as JSON to `path` and deserialize the JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new()
            .with_method(Method::POST)
            .with_json(body)?;
        self.request(path, options).await
    }

    /// PUT `body` as JSON to `path` and deserialize the JSON response.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new()
            .with_method(Method::PUT)
            .with_json(body)?;
        self.request(path, options).await
    }

    /// DELETE `path` and deserialize the JSON response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::new().with_method(Method::DELETE))
            .await
    }

    /// Resolves `path` against the base URL, normalizing the leading slash.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let normalized = normalize_path(path);
        self.base_url
            .join(&normalized)
            .map_err(|e| Error::configuration(format!("invalid API path {:?}: {}", path, e)))
    }

    /// Builds the headers for one request.
    ///
    /// Construction order matters: the JSON content-type baseline first,
    /// caller headers overlaid on top, then the effective session. Explicit
    /// per-call `token`/`schema` take precedence over the provider's values.
    fn build_headers(&self, options: &RequestOptions, json_default: bool) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if json_default {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in options.headers.iter() {
            headers.insert(name, value.clone());
        }

        let session = self.session.resolve();
        let token = options.token.as_deref().or(session.token.as_deref());
        let schema = options.schema.as_deref().or(session.schema.as_deref());

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::new(ErrorKind::Unauthorized, "invalid auth token format"))?;
            headers.insert(AUTHORIZATION, value);
        }
        if let Some(schema) = schema {
            let value = HeaderValue::from_str(schema)
                .map_err(|_| Error::configuration("invalid tenant schema value"))?;
            headers.insert(HeaderName::from_static(SCHEMA_HEADER), value);
        }

        Ok(headers)
    }

    /// Converts a non-success response into an error, reading the body text
    /// best-effort. A secondary read failure degrades to the reason phrase.
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(status = status.as_u16(), "API request failed");

        let reason = status.canonical_reason().unwrap_or("");
        let body_text = response.text().await.unwrap_or_default();
        Err(Error::http_status(status.as_u16(), Some(body_text), reason))
    }
}

/// Prepends a leading `/` when missing. Idempotent.
fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{}", path))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_prepends_slash() {
        assert_eq!(normalize_path("api/celulas"), "/api/celulas");
    }

    #[test]
    fn test_normalize_path_keeps_existing_slash() {
        assert_eq!(normalize_path("/api/celulas"), "/api/celulas");
    }

    #[test]
    fn test_normalize_path_idempotent() {
        let once = normalize_path("api/celulas").into_owned();
        let twice = normalize_path(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_builder_requires_base_url() {
        let err = Client::builder().build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let err = Client::builder().base_url("not a url").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_client_debug_omits_internals() {
        let client = Client::builder()
            .base_url("http://localhost:3000")
            .build()
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("Client"));
        assert!(debug.contains("localhost"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod wiremock_tests {
    use super::*;
    use crate::session::{MemoryStore, SCHEMA_KEY, StoreSessionProvider, TOKEN_KEY};
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Celula {
        id: u32,
        nome: String,
    }

    fn anonymous_client(server: &MockServer) -> Client {
        Client::builder().base_url(server.uri()).build().unwrap()
    }

    fn client_with_store(server: &MockServer, store: MemoryStore) -> Client {
        Client::builder()
            .base_url(server.uri())
            .session_provider(StoreSessionProvider::new(store))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_without_leading_slash() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/celulas"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "nome": "Célula A"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let celulas: Vec<Celula> = client.get("api/celulas").await.unwrap();
        assert_eq!(
            celulas,
            vec![Celula {
                id: 1,
                nome: "Célula A".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_tenant_header_from_store() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/membros"))
            .and(header("X-Church-Schema", "igreja_x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        store.set(SCHEMA_KEY, "igreja_x");

        let client = client_with_store(&server, store);
        let _: Vec<Celula> = client.get("/api/membros").await.unwrap();
    }

    #[tokio::test]
    async fn test_auth_header_from_store() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/dizimos"))
            .and(header("Authorization", "Bearer tok_stored"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok_stored");

        let client = client_with_store(&server, store);
        let _: Vec<Celula> = client.get("/api/dizimos").await.unwrap();
    }

    #[tokio::test]
    async fn test_explicit_overrides_beat_stored_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/relatorios"))
            .and(header("Authorization", "Bearer tok_explicit"))
            .and(header("X-Church-Schema", "igreja_explicita"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "tok_stored");
        store.set(SCHEMA_KEY, "igreja_guardada");

        let client = client_with_store(&server, store);
        let options = RequestOptions::new()
            .with_token("tok_explicit")
            .with_schema("igreja_explicita");
        let _: Vec<Celula> = client.request("/api/relatorios", options).await.unwrap();
    }

    #[tokio::test]
    async fn test_default_content_type_is_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/entradas"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let _: Vec<Celula> = client.get("/api/entradas").await.unwrap();
    }

    #[tokio::test]
    async fn test_caller_headers_override_default_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/upload"))
            .and(header("Content-Type", "text/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let options = RequestOptions::new()
            .with_method(Method::POST)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .with_body("linha");
        let _: serde_json::Value = client.request("/api/upload", options).await.unwrap();
    }

    #[tokio::test]
    async fn test_post_body_passthrough() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/membros"))
            .and(body_json(serde_json::json!({"nome": "Ana"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 9, "nome": "Ana"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        #[derive(Serialize)]
        struct NovoMembro {
            nome: String,
        }

        let client = anonymous_client(&server);
        let created: serde_json::Value = client
            .post(
                "/api/membros",
                &NovoMembro {
                    nome: "Ana".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created["nome"], "Ana");
    }

    #[tokio::test]
    async fn test_create_failure_message_format() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/celulas"))
            .respond_with(ResponseTemplate::new(422).set_body_string("nome obrigatório"))
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let err = client
            .request::<serde_json::Value>(
                "/api/celulas",
                RequestOptions::new().with_method(Method::POST),
            )
            .await
            .unwrap_err();

        assert_eq!(err.message(), "HTTP 422 - nome obrigatório");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.body_text(), Some("nome obrigatório"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_error_without_body_uses_reason_phrase() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/escola"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let err = client.get::<serde_json::Value>("/api/escola").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message(), "HTTP 500 - Internal Server Error");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[tokio::test]
    async fn test_non_json_response_passthrough_via_execute() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/boletim"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/csv")
                    .set_body_string("id;nome\n1;Ana"),
            )
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let response = client
            .execute("/api/boletim", RequestOptions::new())
            .await
            .unwrap();
        assert_eq!(response.text().await.unwrap(), "id;nome\n1;Ana");
    }

    #[tokio::test]
    async fn test_non_json_response_rejected_by_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/boletim"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "text/plain")
                    .set_body_string("nao json"),
            )
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let err = client
            .get::<serde_json::Value>("/api/boletim")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn test_per_call_deadline() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/lenta"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let err = client
            .request::<serde_json::Value>(
                "/api/lenta",
                RequestOptions::new().with_timeout(Duration::from_millis(50)),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_deadline_covers_stalled_body() {
        use tokio::io::AsyncWriteExt;

        // Headers promise 100 bytes but only one arrives; the connection is
        // then held open. The deadline must still fire during the body read.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: application/json\r\n\
                      Content-Length: 100\r\n\r\n[",
                )
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = Client::builder()
            .base_url(format!("http://{}", addr))
            .build()
            .unwrap();
        let err = tokio::time::timeout(
            Duration::from_secs(2),
            client.request::<serde_json::Value>(
                "/api/lenta",
                RequestOptions::new().with_timeout(Duration::from_millis(100)),
            ),
        )
        .await
        .expect("call must resolve at its own deadline")
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_delete_helper() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/celulas/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let deleted: serde_json::Value = client.delete("/api/celulas/3").await.unwrap();
        assert_eq!(deleted["id"], 3);
    }
}
