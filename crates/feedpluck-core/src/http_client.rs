use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::json::{self, JsonValue};
use crate::DecodeError;

/// Default per-request timeout handed to the executor.
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// GET request handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Status and raw body returned by an executor. Any status is data here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body.into().into_bytes())
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn json(&self) -> Result<JsonValue, DecodeError> {
        json::decode(&self.body)
    }

    /// Body as text, replacing invalid UTF-8, for diagnostics.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// What went wrong in the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    Timeout,
    Connect,
    Body,
    Other,
}

/// Transport-level HTTP error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    kind: HttpErrorKind,
    message: String,
}

impl HttpError {
    pub fn new(kind: HttpErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(HttpErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(HttpErrorKind::Connect, message)
    }

    pub const fn kind(&self) -> HttpErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Executor contract: one request in, one status + body (or transport error) out.
///
/// Implementations must not retry; a failure is reported as-is.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

#[derive(Debug, Clone)]
enum FixtureReply {
    Respond(HttpResponse),
    Fail(HttpError),
}

/// Offline executor serving canned replies by exact URL.
///
/// Unknown URLs get a 404 with a small JSON problem body. Every request is
/// recorded so callers can assert on what was sent.
#[derive(Debug, Default)]
pub struct FixtureHttpClient {
    routes: BTreeMap<String, FixtureReply>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl FixtureHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, response: HttpResponse) -> Self {
        self.routes.insert(url.into(), FixtureReply::Respond(response));
        self
    }

    pub fn with_json(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_response(url, HttpResponse::ok_json(body))
    }

    pub fn with_failure(mut self, url: impl Into<String>, error: HttpError) -> Self {
        self.routes.insert(url.into(), FixtureReply::Fail(error));
        self
    }

    /// Requests executed so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        match self.seen.lock() {
            Ok(seen) => seen.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, request: &HttpRequest) {
        match self.seen.lock() {
            Ok(mut seen) => seen.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.record(&request);
        let reply = self.routes.get(&request.url).cloned();
        Box::pin(async move {
            match reply {
                Some(FixtureReply::Respond(response)) => Ok(response),
                Some(FixtureReply::Fail(error)) => Err(error),
                None => Ok(HttpResponse::new(
                    404,
                    format!(r#"{{"status":404,"detail":"no fixture for {}"}}"#, request.url)
                        .into_bytes(),
                )),
            }
        })
    }
}

/// Production HTTP client using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Create a client that sends `user_agent` on every request.
    pub fn new(user_agent: &str) -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(user_agent)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Create a ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_USER_AGENT)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.get(&request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let timeout = std::time::Duration::from_millis(request.timeout_ms);
            builder = builder.timeout(timeout);

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::timeout(format!("request timeout: {}", e))
                } else if e.is_connect() {
                    HttpError::connect(format!("connection failed: {}", e))
                } else {
                    HttpError::new(HttpErrorKind::Other, format!("request failed: {}", e))
                }
            })?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(|e| {
                HttpError::new(
                    HttpErrorKind::Body,
                    format!("failed to read response body: {}", e),
                )
            })?;

            Ok(HttpResponse::new(status, body.to_vec()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_lowercased() {
        let request = HttpRequest::get("https://example.test/points")
            .with_header("User-Agent", "feedpluck-test")
            .with_header("Accept", "application/geo+json");

        assert_eq!(
            request.headers.get("user-agent").map(String::as_str),
            Some("feedpluck-test")
        );
        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/geo+json")
        );
    }

    #[test]
    fn success_covers_only_2xx() {
        assert!(HttpResponse::new(204, Vec::new()).is_success());
        assert!(!HttpResponse::new(301, Vec::new()).is_success());
        assert!(!HttpResponse::new(503, Vec::new()).is_success());
    }

    #[tokio::test]
    async fn fixture_client_serves_routes_and_records_requests() {
        let client = FixtureHttpClient::new()
            .with_json("https://example.test/a", r#"{"ok":true}"#)
            .with_failure("https://example.test/b", HttpError::timeout("slow"));

        let ok = client
            .execute(HttpRequest::get("https://example.test/a"))
            .await
            .expect("fixture route");
        assert_eq!(ok.status, 200);

        let err = client
            .execute(HttpRequest::get("https://example.test/b"))
            .await
            .expect_err("fixture failure");
        assert_eq!(err.kind(), HttpErrorKind::Timeout);

        let missing = client
            .execute(HttpRequest::get("https://example.test/c"))
            .await
            .expect("unknown routes are still responses");
        assert_eq!(missing.status, 404);

        let urls: Vec<String> = client.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            [
                "https://example.test/a",
                "https://example.test/b",
                "https://example.test/c"
            ]
        );
    }
}
