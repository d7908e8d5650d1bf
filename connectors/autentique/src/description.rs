//! Static node description.

use flow_core::{CredentialRequirement, NodeDescription};
use serde_json::json;

use crate::credentials::AutentiqueApi;
use crate::registry::registry;

/// Node type name.
pub const NODE_NAME: &str = "autentique";

/// Describe the node with the registry's full parameter schema.
#[must_use]
pub fn node_description() -> NodeDescription {
    NodeDescription {
        display_name: "Autentique".to_string(),
        name: NODE_NAME.to_string(),
        group: vec!["transform".to_string()],
        version: 1,
        description: "n8n community nodes for Autentique's API".to_string(),
        defaults: json!({ "name": "Autentique" }),
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        credentials: vec![CredentialRequirement {
            name: AutentiqueApi::NAME.to_string(),
            required: true,
        }],
        properties: registry().aggregated_properties(),
    }
}
