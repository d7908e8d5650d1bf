//! Wire messages between a host and a node process.
//!
//! One JSON object per line in each direction:
//! `{"id", "method", "params"}` in, `{"jsonrpc", "id", "result" | "error"}` out.

use serde::{Deserialize, Serialize};

use crate::NodeErrorResponse;

/// Protocol version tag written on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// Request from host to node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRequest {
    /// Correlation ID echoed back in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    /// Method name (`configure`, `describe`, `execute`, ...).
    pub method: String,

    /// Method parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response from node to host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub jsonrpc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<NodeErrorResponse>,
}

impl HostResponse {
    /// A successful response.
    #[must_use]
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// An error response.
    #[must_use]
    pub fn failure(id: Option<serde_json::Value>, error: NodeErrorResponse) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Returns true if the response carries a result.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.result.is_some()
    }
}
