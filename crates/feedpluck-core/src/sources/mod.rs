//! Source clients.
//!
//! Each client composes the core stages explicitly: build a
//! [`RequestDescriptor`], execute it, check the status, decode the body, then
//! pluck what the next stage needs. Every stage returns `Result<_, ApiError>`
//! so a chain stops at the first failure. Nothing is retried.

pub mod parliament;
pub mod weather;

use std::sync::Arc;

use crate::http_client::{HttpClient, HttpResponse};
use crate::json::JsonValue;
use crate::{ApiError, ClientConfig, RequestDescriptor};

pub use parliament::ParliamentClient;
pub use weather::{Coordinates, WeatherClient};

/// Executes descriptors with the configured identification and timeout.
#[derive(Clone)]
pub struct Fetcher {
    http: Arc<dyn HttpClient>,
    user_agent: String,
    timeout_ms: u64,
}

impl Fetcher {
    pub fn new(http: Arc<dyn HttpClient>, config: &ClientConfig) -> Self {
        Self {
            http,
            user_agent: config.user_agent.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Status and body as returned; a non-2xx status is not an error here.
    pub async fn send(
        &self,
        descriptor: &RequestDescriptor,
        accept: &str,
    ) -> Result<HttpResponse, ApiError> {
        let request = descriptor
            .to_http_request()
            .with_header("accept", accept)
            .with_header("user-agent", self.user_agent.as_str())
            .with_timeout_ms(self.timeout_ms);

        tracing::debug!(url = %request.url, timeout_ms = request.timeout_ms, "sending request");
        let response = self.http.execute(request).await.map_err(|error| {
            tracing::warn!(url = %descriptor, kind = ?error.kind(), %error, "request failed");
            ApiError::Network(error)
        })?;
        tracing::debug!(url = %descriptor, status = response.status, bytes = response.body.len(), "response received");

        Ok(response)
    }

    /// Decoded body of a 2xx response.
    pub async fn get_json(
        &self,
        descriptor: &RequestDescriptor,
        accept: &str,
    ) -> Result<JsonValue, ApiError> {
        let response = self.send(descriptor, accept).await?;
        if !response.is_success() {
            tracing::warn!(url = %descriptor, status = response.status, "unexpected status");
            return Err(ApiError::UnexpectedStatus {
                status: response.status,
                url: descriptor.to_string(),
            });
        }

        response.json().map_err(|error| {
            tracing::warn!(url = %descriptor, %error, "undecodable response body");
            ApiError::Decode(error)
        })
    }
}
