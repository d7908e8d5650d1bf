//! Host execution context.
//!
//! [`ExecuteFunctions`] is the seam between a node and the host runtime: the
//! host owns parameter storage, binary storage and credential decryption, and
//! exposes them per item index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BinaryData, CredentialData, NodeError, NodeResult};

/// Per-run view of the host runtime.
pub trait ExecuteFunctions: Send + Sync {
    /// Number of input items in this run.
    fn input_len(&self) -> usize;

    /// Value of a parameter for an item, with expressions already resolved.
    fn node_parameter(&self, name: &str, item_index: usize) -> Option<serde_json::Value>;

    /// Binary attachment stored on an item under `property`.
    fn binary_data(&self, item_index: usize, property: &str) -> NodeResult<BinaryData>;

    /// Decrypted credentials of the given type.
    fn credentials(&self, name: &str) -> NodeResult<CredentialData>;

    /// Whether failed items degrade to error records instead of aborting.
    fn continue_on_fail(&self) -> bool;
}

/// One input item with its resolved parameters and attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    /// Item payload from the previous node.
    #[serde(default)]
    pub json: serde_json::Value,

    /// Parameters resolved for this item; override node-level ones.
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,

    /// Binary attachments keyed by property name.
    #[serde(default)]
    pub binary: BTreeMap<String, BinaryData>,
}

/// A fully materialized execution context, as sent by a host over the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticExecuteContext {
    /// Parameters shared by every item.
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,

    /// Input items, in order.
    #[serde(default)]
    pub items: Vec<ItemInput>,

    /// Credentials keyed by credential type name.
    #[serde(default)]
    pub credentials: BTreeMap<String, CredentialData>,

    #[serde(default)]
    pub continue_on_fail: bool,
}

impl ExecuteFunctions for StaticExecuteContext {
    fn input_len(&self) -> usize {
        self.items.len()
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Option<serde_json::Value> {
        let item = self.items.get(item_index)?;
        item.parameters
            .get(name)
            .or_else(|| self.parameters.get(name))
            .cloned()
    }

    fn binary_data(&self, item_index: usize, property: &str) -> NodeResult<BinaryData> {
        self.items
            .get(item_index)
            .and_then(|item| item.binary.get(property))
            .cloned()
            .ok_or_else(|| NodeError::MissingBinaryData {
                item_index,
                property: property.to_string(),
            })
    }

    fn credentials(&self, name: &str) -> NodeResult<CredentialData> {
        self.credentials
            .get(name)
            .cloned()
            .ok_or_else(|| NodeError::MissingCredentials {
                name: name.to_string(),
            })
    }

    fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> StaticExecuteContext {
        serde_json::from_value(serde_json::json!({
            "parameters": {"resource": "document", "operation": "list"},
            "items": [
                {"parameters": {"limit": 10}},
                {"parameters": {"operation": "getById"}, "binary": {
                    "data": {"data": "aGk=", "fileName": "hi.txt"}
                }}
            ],
            "credentials": {"autentiqueApi": {"apiToken": "t"}},
            "continueOnFail": true
        }))
        .unwrap()
    }

    #[test]
    fn item_parameters_override_node_parameters() {
        let ctx = context();
        assert_eq!(ctx.input_len(), 2);
        assert_eq!(ctx.node_parameter("operation", 0).unwrap(), "list");
        assert_eq!(ctx.node_parameter("operation", 1).unwrap(), "getById");
        assert_eq!(ctx.node_parameter("limit", 0).unwrap(), 10);
        assert!(ctx.node_parameter("limit", 1).is_none());
        assert!(ctx.node_parameter("resource", 5).is_none());
        assert!(ctx.continue_on_fail());
    }

    #[test]
    fn binary_and_credentials_lookup() {
        let ctx = context();
        let binary = ctx.binary_data(1, "data").unwrap();
        assert_eq!(binary.decode("data").unwrap(), b"hi");
        assert!(matches!(
            ctx.binary_data(0, "data"),
            Err(NodeError::MissingBinaryData { item_index: 0, .. })
        ));
        assert!(ctx.credentials("autentiqueApi").is_ok());
        assert!(matches!(
            ctx.credentials("other"),
            Err(NodeError::MissingCredentials { .. })
        ));
    }
}
