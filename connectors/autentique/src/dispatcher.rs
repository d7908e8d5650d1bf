//! Per-item dispatch.
//!
//! Items run strictly in order. For each item the dispatcher reads the
//! `resource` selection, looks it up, then reads `operation`, looks it up and
//! executes it. Any failure is tagged with the item index; the run either
//! aborts on it or records it and moves on, depending on the context.

use async_trait::async_trait;
use flow_core::{
    CredentialDescription, ExecuteFunctions, NodeDescription, NodeError, NodeExecutionData,
    NodeOperationError, NodeResult, NodeType,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::AutentiqueClient;
use crate::config::AutentiqueConfig;
use crate::credentials::AutentiqueApi;
use crate::description::node_description;
use crate::registry::registry;

/// The Autentique node.
#[derive(Debug, Clone)]
pub struct AutentiqueNode {
    client: AutentiqueClient,
}

impl AutentiqueNode {
    /// Create a node from configuration.
    pub fn new(config: &AutentiqueConfig) -> NodeResult<Self> {
        Ok(Self::with_client(AutentiqueClient::new(config)?))
    }

    #[must_use]
    pub const fn with_client(client: AutentiqueClient) -> Self {
        Self { client }
    }

    /// The underlying API client.
    #[must_use]
    pub const fn client(&self) -> &AutentiqueClient {
        &self.client
    }

    async fn execute_item(&self, ctx: &dyn ExecuteFunctions, item_index: usize) -> NodeResult<Value> {
        let resource = selection(ctx, item_index, "resource", "Resource")?;
        let resource = registry().get_resource(&resource)?;
        let operation = selection(ctx, item_index, "operation", "Operation")?;
        let operation = resource.get_operation(&operation)?;
        operation.execute(ctx, item_index, &self.client).await
    }
}

fn selection(
    ctx: &dyn ExecuteFunctions,
    item_index: usize,
    name: &str,
    label: &str,
) -> NodeResult<String> {
    match ctx.node_parameter(name, item_index) {
        Some(Value::String(value)) if !value.trim().is_empty() => Ok(value),
        _ => Err(NodeError::validation(name, format!("{label} is required"))),
    }
}

#[async_trait]
impl NodeType for AutentiqueNode {
    fn description(&self) -> NodeDescription {
        node_description()
    }

    fn credential_types(&self) -> Vec<CredentialDescription> {
        vec![AutentiqueApi::description(self.client.endpoint())]
    }

    #[instrument(skip_all, fields(items = ctx.input_len()))]
    async fn execute(
        &self,
        ctx: &dyn ExecuteFunctions,
    ) -> Result<Vec<NodeExecutionData>, NodeOperationError> {
        let mut records = Vec::with_capacity(ctx.input_len());

        for item_index in 0..ctx.input_len() {
            match self.execute_item(ctx, item_index).await {
                Ok(json) => {
                    debug!(item_index, "item succeeded");
                    records.push(NodeExecutionData::success(json, item_index));
                }
                Err(err) => {
                    let err = NodeOperationError::new(item_index, err);
                    if !ctx.continue_on_fail() {
                        return Err(err);
                    }
                    warn!(
                        item_index,
                        code = err.source.code(),
                        error = %err.source,
                        "item failed, continuing"
                    );
                    records.push(NodeExecutionData::failure(err));
                }
            }
        }

        Ok(records)
    }
}
