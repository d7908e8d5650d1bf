//! Node trait and description types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    CredentialDescription, CredentialRequirement, ExecuteFunctions, NodeExecutionData,
    NodeOperationError, NodeProperty,
};

/// Static description of a node, rendered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: serde_json::Value,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub credentials: Vec<CredentialRequirement>,
    pub properties: Vec<NodeProperty>,
}

/// A node the host can execute.
#[async_trait]
pub trait NodeType: Send + Sync {
    /// Describe the node and its full parameter schema.
    fn description(&self) -> NodeDescription;

    /// Credential types this node declares.
    fn credential_types(&self) -> Vec<CredentialDescription>;

    /// Process every input item, in order.
    ///
    /// Returns one output record per item. A failed item either becomes an
    /// error record (when the context continues on failure) or aborts the run.
    async fn execute(
        &self,
        ctx: &dyn ExecuteFunctions,
    ) -> Result<Vec<NodeExecutionData>, NodeOperationError>;
}
