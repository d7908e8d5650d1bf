//! GraphQL request sender.
//!
//! One POST per call to a fixed endpoint, no retries. Every failure comes
//! back as a [`GraphqlClientError`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::{debug, instrument};

use crate::auth::RequestAuthenticator;
use crate::error::GraphqlClientError;
use crate::multipart::{MultipartUpload, UploadFile};
use crate::operation::{GraphqlRequest, decode_envelope};

/// Sender metrics.
#[derive(Debug, Default)]
#[allow(clippy::struct_field_names)]
pub struct GraphqlSenderMetrics {
    requests_total: AtomicU64,
    requests_success: AtomicU64,
    requests_error: AtomicU64,
}

impl GraphqlSenderMetrics {
    /// Snapshot current metrics.
    #[must_use]
    pub fn snapshot(&self) -> GraphqlSenderMetricsSnapshot {
        GraphqlSenderMetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_error: self.requests_error.load(Ordering::Relaxed),
        }
    }
}

/// Metrics snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_field_names)]
pub struct GraphqlSenderMetricsSnapshot {
    /// Total requests.
    pub requests_total: u64,
    /// Requests that returned `data`.
    pub requests_success: u64,
    /// Requests that failed for any reason.
    pub requests_error: u64,
}

/// Sender configuration.
#[derive(Debug, Clone)]
pub struct GraphqlSenderConfig {
    /// Default headers applied to every request.
    ///
    /// No `Content-Type` here: it depends on the body kind.
    pub headers: HeaderMap,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GraphqlSenderConfig {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Sender builder.
#[derive(Debug, Clone)]
pub struct GraphqlSenderBuilder {
    endpoint: String,
    config: GraphqlSenderConfig,
}

impl GraphqlSenderBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            config: GraphqlSenderConfig::default(),
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Set the `User-Agent` header. Invalid values are ignored.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl AsRef<str>) -> Self {
        if let Ok(value) = HeaderValue::from_str(user_agent.as_ref()) {
            self.config.headers.insert(USER_AGENT, value);
        }
        self
    }

    /// Set timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the sender.
    pub fn build(self) -> Result<GraphqlSender, GraphqlClientError> {
        GraphqlSender::with_config(self.endpoint, self.config)
    }
}

/// Request body: plain JSON or multipart upload.
#[derive(Debug, Clone)]
pub enum GraphqlBody {
    Json(GraphqlRequest),
    Multipart(MultipartUpload),
}

impl GraphqlBody {
    /// Returns true for a plain JSON body.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// GraphQL request sender.
#[derive(Debug, Clone)]
pub struct GraphqlSender {
    endpoint: String,
    http: reqwest::Client,
    metrics: Arc<GraphqlSenderMetrics>,
}

impl GraphqlSender {
    /// Create a sender with default configuration.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self::with_config(endpoint.clone(), GraphqlSenderConfig::default())
            .unwrap_or_else(|_| Self::new_with_client(endpoint, reqwest::Client::new()))
    }

    /// Create a sender with custom configuration.
    pub fn with_config(
        endpoint: impl Into<String>,
        config: GraphqlSenderConfig,
    ) -> Result<Self, GraphqlClientError> {
        let http = reqwest::Client::builder()
            .default_headers(config.headers)
            .timeout(config.timeout)
            .build()?;
        Ok(Self::new_with_client(endpoint, http))
    }

    fn new_with_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
            metrics: Arc::new(GraphqlSenderMetrics::default()),
        }
    }

    /// Target endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Return metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> GraphqlSenderMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Send a plain `{query, variables}` request and return `data`.
    pub async fn send_json(
        &self,
        request: GraphqlRequest,
        auth: &dyn RequestAuthenticator,
    ) -> Result<serde_json::Value, GraphqlClientError> {
        self.send(GraphqlBody::Json(request), auth).await
    }

    /// Send a mutation with an attached file and return `data`.
    pub async fn send_with_file(
        &self,
        operations: GraphqlRequest,
        file: UploadFile,
        auth: &dyn RequestAuthenticator,
    ) -> Result<serde_json::Value, GraphqlClientError> {
        self.send(GraphqlBody::Multipart(MultipartUpload::new(operations, file)), auth)
            .await
    }

    /// Send a request and unwrap the response envelope.
    #[instrument(skip_all, fields(endpoint = %self.endpoint, json = body.is_json()))]
    pub async fn send(
        &self,
        body: GraphqlBody,
        auth: &dyn RequestAuthenticator,
    ) -> Result<serde_json::Value, GraphqlClientError> {
        self.metrics.requests_total.fetch_add(1, Ordering::Relaxed);
        let result = self.send_once(body, auth).await;
        match &result {
            Ok(_) => {
                self.metrics
                    .requests_success
                    .fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.metrics.requests_error.fetch_add(1, Ordering::Relaxed);
                debug!(error = %err, "GraphQL request failed");
            }
        }
        result
    }

    async fn send_once(
        &self,
        body: GraphqlBody,
        auth: &dyn RequestAuthenticator,
    ) -> Result<serde_json::Value, GraphqlClientError> {
        let request = self.http.post(&self.endpoint);
        let request = match body {
            GraphqlBody::Json(request_body) => request.json(&request_body),
            GraphqlBody::Multipart(upload) => request.multipart(upload.into_form()?),
        };
        let request = auth.authenticate(request)?;

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "GraphQL response received");

        if !status.is_success() {
            return Err(GraphqlClientError::HttpStatus {
                status,
                body: truncate_body(&bytes),
            });
        }

        decode_envelope(&bytes)
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    const MAX_LEN: usize = 4096;
    let mut body = String::from_utf8_lossy(bytes).to_string();
    if body.len() > MAX_LEN {
        let mut end = MAX_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push('…');
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(3000);
        let truncated = truncate_body(body.as_bytes());
        assert!(truncated.ends_with('…'));
        assert!(truncated.len() <= 4096 + '…'.len_utf8());
    }

    #[test]
    fn short_body_untouched() {
        assert_eq!(truncate_body(b"Unauthenticated."), "Unauthenticated.");
    }
}
