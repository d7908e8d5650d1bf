//! Mock GraphQL endpoint for testing nodes.
//!
//! Wraps wiremock: every mock answers `POST {GRAPHQL_PATH}` with a GraphQL
//! envelope.

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the mock endpoint listens on.
pub const GRAPHQL_PATH: &str = "/v2/graphql";

/// A mock GraphQL server.
pub struct MockGraphqlServer {
    server: MockServer,
}

fn envelope(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(body)
        .insert_header("content-type", "application/json")
}

fn graphql_post() -> wiremock::MockBuilder {
    Mock::given(method("POST")).and(path(GRAPHQL_PATH))
}

impl MockGraphqlServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full URL of the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{GRAPHQL_PATH}", self.server.uri())
    }

    /// Get the underlying wiremock server for advanced configuration.
    #[must_use]
    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Response Setup
    // ─────────────────────────────────────────────────────────────────────────────

    /// Answer every request with `{"data": data}`.
    pub async fn expect_data(&self, data: serde_json::Value) {
        graphql_post()
            .respond_with(envelope(serde_json::json!({ "data": data })))
            .mount(&self.server)
            .await;
    }

    /// Answer with `{"data": data}` and verify on drop that exactly `times`
    /// requests arrived.
    pub async fn expect_data_times(&self, data: serde_json::Value, times: u64) {
        graphql_post()
            .respond_with(envelope(serde_json::json!({ "data": data })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer requests whose body contains `fragment` with `{"data": data}`.
    pub async fn expect_data_for(&self, fragment: &str, data: serde_json::Value) {
        graphql_post()
            .and(body_string_contains(fragment))
            .respond_with(envelope(serde_json::json!({ "data": data })))
            .mount(&self.server)
            .await;
    }

    /// Answer requests carrying the given bearer token with `{"data": data}`.
    pub async fn expect_data_with_bearer(&self, token: &str, data: serde_json::Value) {
        graphql_post()
            .and(header("authorization", format!("Bearer {token}").as_str()))
            .respond_with(envelope(serde_json::json!({ "data": data })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with `{"errors": errors}`.
    pub async fn expect_errors(&self, errors: serde_json::Value) {
        graphql_post()
            .respond_with(envelope(serde_json::json!({ "errors": errors })))
            .mount(&self.server)
            .await;
    }

    /// Answer every request with a non-2xx status and a raw body.
    pub async fn expect_status(&self, status: u16, body: &str) {
        graphql_post()
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer with data after a delay.
    pub async fn expect_delayed(&self, delay: std::time::Duration, data: serde_json::Value) {
        graphql_post()
            .respond_with(envelope(serde_json::json!({ "data": data })).set_delay(delay))
            .mount(&self.server)
            .await;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────────

    /// Get all received requests for manual inspection.
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Bodies of every received JSON request, in arrival order.
    ///
    /// Multipart requests are skipped.
    pub async fn received_json_bodies(&self) -> Vec<serde_json::Value> {
        self.received_requests()
            .await
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    /// Verify that a specific number of requests were received.
    ///
    /// # Panics
    ///
    /// Panics if the count doesn't match.
    pub async fn assert_request_count(&self, expected: usize) {
        let received = self.received_requests().await;
        assert_eq!(
            received.len(),
            expected,
            "Expected {} requests but received {}",
            expected,
            received.len()
        );
    }

    /// Verify that no requests were received.
    ///
    /// # Panics
    ///
    /// Panics if any requests were received.
    pub async fn assert_no_requests(&self) {
        self.assert_request_count(0).await;
    }

    /// Check every mounted `expect_*_times` expectation now.
    pub async fn verify(&self) {
        self.server.verify().await;
    }
}
