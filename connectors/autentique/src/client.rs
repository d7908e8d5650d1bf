//! Autentique API client.

use flow_core::{NodeError, NodeResult};
use flow_graphql::{
    GraphqlBody, GraphqlSender, GraphqlSenderBuilder, GraphqlSenderMetricsSnapshot,
    MultipartUpload, RequestAuthenticator,
};

use crate::config::AutentiqueConfig;
use crate::operation::PreparedRequest;

/// Sends prepared requests to the configured endpoint.
#[derive(Debug, Clone)]
pub struct AutentiqueClient {
    sender: GraphqlSender,
}

impl AutentiqueClient {
    /// Create a client from configuration.
    pub fn new(config: &AutentiqueConfig) -> NodeResult<Self> {
        let sender = GraphqlSenderBuilder::new(&config.api_url)
            .with_timeout(config.timeout)
            .with_user_agent(&config.user_agent)
            .build()
            .map_err(|e| NodeError::Internal {
                message: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { sender })
    }

    /// Target endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.sender.endpoint()
    }

    /// Request counters.
    #[must_use]
    pub fn metrics(&self) -> GraphqlSenderMetricsSnapshot {
        self.sender.metrics()
    }

    /// Send a prepared request and return the response `data`.
    pub async fn send(
        &self,
        prepared: PreparedRequest,
        auth: &dyn RequestAuthenticator,
    ) -> NodeResult<serde_json::Value> {
        let body = match prepared.upload {
            Some(file) => GraphqlBody::Multipart(MultipartUpload::new(prepared.request, file)),
            None => GraphqlBody::Json(prepared.request),
        };
        Ok(self.sender.send(body, auth).await?)
    }
}
