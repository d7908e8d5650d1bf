//! Credentials handed over by the host.
//!
//! Nodes never read credential fields directly: they pass the
//! [`CredentialData`] to their credential type, which decorates the outgoing
//! request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{NodeError, NodeProperty, NodeResult, SecretString};

/// Decrypted credential fields for one credential type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialData {
    fields: BTreeMap<String, SecretString>,
}

impl CredentialData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<SecretString>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SecretString> {
        self.fields.get(name)
    }

    /// Look up a field that must be present and non-blank.
    pub fn required_field(&self, credential: &str, name: &str) -> NodeResult<&SecretString> {
        self.field(name)
            .filter(|value| !value.is_blank())
            .ok_or_else(|| NodeError::InvalidCredentials {
                name: credential.to_string(),
                message: format!("'{name}' is required"),
            })
    }
}

/// Credential type declaration exposed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDescription {
    pub name: String,
    pub display_name: String,
    pub properties: Vec<NodeProperty>,
    /// Endpoint the host may call to test the credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_url: Option<String>,
}

/// Reference from a node to a credential type it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequirement {
    pub name: String,
    pub required: bool,
}
