//! Host protocol handlers.

use flow_core::{
    CredentialData, HostRequest, HostResponse, NodeError, NodeErrorResponse, NodeResult, NodeType,
    StaticExecuteContext,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::config::AutentiqueConfig;
use crate::credentials::AutentiqueApi;
use crate::description::node_description;
use crate::dispatcher::AutentiqueNode;

#[derive(Debug, Deserialize)]
struct TestCredentialsParams {
    credentials: CredentialData,
}

/// Serves `configure`, `describe`, `execute`, `test_credentials` and `health`.
#[derive(Debug, Default)]
pub struct AutentiqueConnector {
    config: AutentiqueConfig,
    node: Option<AutentiqueNode>,
}

impl AutentiqueConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a connector with a preset configuration.
    #[must_use]
    pub fn with_config(config: AutentiqueConfig) -> Self {
        Self { config, node: None }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &AutentiqueConfig {
        &self.config
    }

    /// Answer one host request.
    pub async fn handle(&mut self, request: HostRequest) -> HostResponse {
        let HostRequest { id, method, params } = request;
        match self.dispatch(&method, params).await {
            Ok(result) => HostResponse::success(id, result),
            Err(error) => HostResponse::failure(id, error),
        }
    }

    async fn dispatch(
        &mut self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, NodeErrorResponse> {
        match method {
            "configure" => self.handle_configure(params).map_err(|e| e.to_response()),
            "describe" => Ok(self.handle_describe()),
            "execute" => self.handle_execute(params).await,
            "test_credentials" => self
                .handle_test_credentials(params)
                .await
                .map_err(|e| e.to_response()),
            "health" => Ok(self.handle_health()),
            _ => Err(NodeError::InvalidRequest {
                message: format!("Unknown method: {method}"),
            }
            .to_response()),
        }
    }

    fn node(&mut self) -> NodeResult<&AutentiqueNode> {
        if self.node.is_none() {
            self.node = Some(AutentiqueNode::new(&self.config)?);
        }
        self.node.as_ref().ok_or_else(|| NodeError::Internal {
            message: "node not initialized".into(),
        })
    }

    /// Replace the configuration and rebuild the client.
    #[instrument(skip(self, params))]
    pub fn handle_configure(&mut self, params: serde_json::Value) -> NodeResult<serde_json::Value> {
        let config: AutentiqueConfig = if params.is_null() {
            AutentiqueConfig::default()
        } else {
            serde_json::from_value(params).map_err(|e| NodeError::InvalidRequest {
                message: format!("Invalid configuration: {e}"),
            })?
        };
        let node = AutentiqueNode::new(&config)?;
        info!(
            api_url = %config.api_url,
            timeout_secs = config.timeout.as_secs(),
            "Autentique node configured"
        );
        self.config = config;
        self.node = Some(node);
        Ok(json!({ "status": "configured" }))
    }

    /// Node and credential descriptions.
    #[must_use]
    pub fn handle_describe(&self) -> serde_json::Value {
        json!({
            "node": node_description(),
            "credentials": [AutentiqueApi::description(&self.config.api_url)],
        })
    }

    /// Run the node over a host context. The result has one output branch.
    pub async fn handle_execute(
        &mut self,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, NodeErrorResponse> {
        let ctx: StaticExecuteContext = serde_json::from_value(params).map_err(|e| {
            NodeError::InvalidRequest {
                message: format!("Invalid execution context: {e}"),
            }
            .to_response()
        })?;
        let node = self.node().map_err(|e| e.to_response())?;
        let records = node.execute(&ctx).await.map_err(|e| e.to_response())?;
        Ok(json!([records]))
    }

    /// Check a token against the API. Failures are reported, not raised.
    pub async fn handle_test_credentials(
        &mut self,
        params: serde_json::Value,
    ) -> NodeResult<serde_json::Value> {
        let params: TestCredentialsParams =
            serde_json::from_value(params).map_err(|e| NodeError::InvalidRequest {
                message: format!("Invalid credential test params: {e}"),
            })?;
        let node = self.node()?;
        let result = AutentiqueApi::test(node.client(), &params.credentials).await;
        Ok(json!(result))
    }

    /// Request counters of the current client.
    #[must_use]
    pub fn handle_health(&self) -> serde_json::Value {
        match &self.node {
            Some(node) => {
                let metrics = node.client().metrics();
                json!({
                    "status": "healthy",
                    "metrics": {
                        "requests_total": metrics.requests_total,
                        "requests_success": metrics.requests_success,
                        "requests_error": metrics.requests_error,
                    }
                })
            }
            None => json!({ "status": "not_configured" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: serde_json::Value) -> HostRequest {
        HostRequest {
            id: Some(json!(7)),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn unknown_method_is_invalid_request() {
        let response = AutentiqueConnector::new()
            .handle(request("introspect", json!({})))
            .await;
        assert_eq!(response.id, Some(json!(7)));
        let error = response.error.unwrap();
        assert_eq!(error.code, "NODE-1002");
        assert_eq!(error.message, "Unknown method: introspect");
    }

    #[tokio::test]
    async fn configure_then_health() {
        let mut connector = AutentiqueConnector::new();
        assert_eq!(connector.handle_health()["status"], "not_configured");

        let response = connector
            .handle(request(
                "configure",
                json!({"api_url": "http://127.0.0.1:9/v2/graphql", "timeout": 5}),
            ))
            .await;
        assert!(response.is_success());
        assert_eq!(connector.config().api_url, "http://127.0.0.1:9/v2/graphql");

        let health = connector.handle_health();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["metrics"]["requests_total"], 0);
    }

    #[tokio::test]
    async fn bad_configuration_is_rejected() {
        let mut connector = AutentiqueConnector::new();
        let err = connector.handle_configure(json!({"timeout": "soon"})).unwrap_err();
        assert_eq!(err.code(), "NODE-1002");
    }

    #[test]
    fn describe_includes_credentials() {
        let described = AutentiqueConnector::new().handle_describe();
        assert_eq!(described["node"]["name"], "autentique");
        assert_eq!(described["credentials"][0]["name"], "autentiqueApi");
    }

    #[tokio::test]
    async fn malformed_execution_context() {
        let err = AutentiqueConnector::new()
            .handle_execute(json!({"items": "none"}))
            .await
            .unwrap_err();
        assert_eq!(err.code, "NODE-1002");
    }
}
