//! HTTP client for the peanuts service.

pub mod characters;
pub mod health;
pub mod payment;

use std::time::{Duration, Instant};

use reqwest::Method;

use crate::error::{ClientError, Result};

/// Default server URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// HTTP client for the peanuts service.
#[derive(Debug, Clone)]
pub struct PeanutsClient {
    client: reqwest::Client,
    base_url: String,
}

impl PeanutsClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a bodiless request and reports only its status and latency.
    ///
    /// Any status is a successful exchange; only transport failures are errors.
    pub async fn probe(&self, method: Method, path: &str) -> Result<(u16, Duration)> {
        let started = Instant::now();
        let response = self.client.request(method, self.url(path)).send().await?;
        let status = response.status().as_u16();
        // Drain the body so the latency covers the whole response.
        response.bytes().await?;
        Ok((status, started.elapsed()))
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(server_error(response).await)
        }
    }
}

/// Builds a `ServerError`, preferring the `message` field of a JSON error body.
async fn server_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(text);

    ClientError::ServerError { status, message }
}
