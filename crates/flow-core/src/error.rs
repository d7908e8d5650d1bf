//! Node error types and error response structures.
//!
//! Error codes:
//! - NODE-1xxx: Parameter and request validation errors
//! - NODE-2xxx: Resource/operation selection errors
//! - NODE-3xxx: Host collaborator errors (binary data, credentials)
//! - NODE-7xxx: Remote API and transport errors
//! - NODE-9xxx: Internal errors

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Error type covering every way a node operation can fail.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum NodeError {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation errors (NODE-1xxx)
    // ─────────────────────────────────────────────────────────────────────────
    /// A parameter is missing, blank or malformed. Raised before any network call.
    #[error("{message}")]
    Validation { parameter: String, message: String },

    /// Malformed or unknown host request.
    #[error("{message}")]
    InvalidRequest { message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Selection errors (NODE-2xxx)
    // ─────────────────────────────────────────────────────────────────────────
    /// Unknown resource, or an operation the resource does not provide.
    #[error("{}", selection_message(resource, operation.as_deref()))]
    UnsupportedSelection {
        resource: String,
        operation: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Host collaborator errors (NODE-3xxx)
    // ─────────────────────────────────────────────────────────────────────────
    #[error("No binary data exists on item {item_index} for property '{property}'")]
    MissingBinaryData { item_index: usize, property: String },

    #[error("Invalid binary data for property '{property}': {message}")]
    InvalidBinaryData { property: String, message: String },

    #[error("Node does not have any credentials set for '{name}'")]
    MissingCredentials { name: String },

    #[error("Invalid credentials for '{name}': {message}")]
    InvalidCredentials { name: String, message: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Remote errors (NODE-7xxx)
    // ─────────────────────────────────────────────────────────────────────────
    /// The API answered with a non-empty `errors` array.
    #[error("Error while sending request. Message: {message}")]
    Api {
        message: String,
        errors: serde_json::Value,
    },

    /// Network, HTTP status or decoding failure.
    #[error("Error while sending request. Message: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Internal errors (NODE-9xxx)
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn selection_message(resource: &str, operation: Option<&str>) -> String {
    match operation {
        Some(operation) => {
            format!("The operation '{operation}' is not supported by resource '{resource}'")
        }
        None => format!("The resource '{resource}' is not supported"),
    }
}

impl NodeError {
    /// Build a validation error for a parameter.
    pub fn validation(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Build an unsupported-resource error.
    pub fn unsupported_resource(resource: impl Into<String>) -> Self {
        Self::UnsupportedSelection {
            resource: resource.into(),
            operation: None,
        }
    }

    /// Build an unsupported-operation error.
    pub fn unsupported_operation(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedSelection {
            resource: resource.into(),
            operation: Some(operation.into()),
        }
    }

    /// Stable error code for the wire format.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "NODE-1001",
            Self::InvalidRequest { .. } => "NODE-1002",
            Self::UnsupportedSelection { operation: None, .. } => "NODE-2001",
            Self::UnsupportedSelection { .. } => "NODE-2002",
            Self::MissingBinaryData { .. } => "NODE-3001",
            Self::InvalidBinaryData { .. } => "NODE-3002",
            Self::MissingCredentials { .. } => "NODE-3003",
            Self::InvalidCredentials { .. } => "NODE-3004",
            Self::Api { .. } => "NODE-7001",
            Self::Transport { .. } => "NODE-7002",
            Self::Internal { .. } => "NODE-9001",
        }
    }

    /// Variant name, as written in the `category` tag.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation",
            Self::InvalidRequest { .. } => "InvalidRequest",
            Self::UnsupportedSelection { .. } => "UnsupportedSelection",
            Self::MissingBinaryData { .. } => "MissingBinaryData",
            Self::InvalidBinaryData { .. } => "InvalidBinaryData",
            Self::MissingCredentials { .. } => "MissingCredentials",
            Self::InvalidCredentials { .. } => "InvalidCredentials",
            Self::Api { .. } => "Api",
            Self::Transport { .. } => "Transport",
            Self::Internal { .. } => "Internal",
        }
    }

    /// Returns true if the failure happened before any request left the node.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Api { .. } | Self::Transport { .. })
    }

    /// Convert to wire response format.
    #[must_use]
    pub fn to_response(&self) -> NodeErrorResponse {
        NodeErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Extract structured details for the error.
    #[must_use]
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { parameter, .. } => Some(serde_json::json!({
                "parameter": parameter,
            })),
            Self::UnsupportedSelection {
                resource,
                operation,
            } => Some(serde_json::json!({
                "resource": resource,
                "operation": operation,
            })),
            Self::Api { errors, .. } => Some(serde_json::json!({
                "errors": errors,
            })),
            Self::Transport { status_code, .. } => Some(serde_json::json!({
                "status_code": status_code,
            })),
            Self::MissingBinaryData { property, .. } | Self::InvalidBinaryData { property, .. } => {
                Some(serde_json::json!({ "property": property }))
            }
            Self::MissingCredentials { name } | Self::InvalidCredentials { name, .. } => {
                Some(serde_json::json!({ "credential": name }))
            }
            Self::InvalidRequest { .. } | Self::Internal { .. } => None,
        }
    }
}

/// Result type alias for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

/// Wire format for error responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeErrorResponse {
    /// Error code (e.g., "NODE-1001")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Structured context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An error tagged with the input item it belongs to.
///
/// The dispatcher is the only place that produces these: either as the
/// `error` of a degraded output record or as the error that aborts a run.
///
/// On the wire it is `{itemIndex, category, code, message, details?}`, where
/// `message` is always the display text of the underlying failure.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} (item {item_index})")]
pub struct NodeOperationError {
    /// Index of the input item that failed.
    pub item_index: usize,
    /// Underlying failure.
    pub source: NodeError,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OperationErrorRecord {
    item_index: usize,
    category: &'static str,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl Serialize for NodeOperationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OperationErrorRecord {
            item_index: self.item_index,
            category: self.source.category(),
            code: self.source.code(),
            message: self.source.to_string(),
            details: self.source.details(),
        }
        .serialize(serializer)
    }
}

impl NodeOperationError {
    /// Tag an error with its item index.
    #[must_use]
    pub const fn new(item_index: usize, source: NodeError) -> Self {
        Self { item_index, source }
    }

    /// Human-readable message of the underlying failure.
    #[must_use]
    pub fn message(&self) -> String {
        self.source.to_string()
    }

    /// Convert to wire response format, carrying the item index in the details.
    #[must_use]
    pub fn to_response(&self) -> NodeErrorResponse {
        let mut response = self.source.to_response();
        let mut details = match response.details.take() {
            Some(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        };
        details.insert("item_index".into(), self.item_index.into());
        response.details = Some(serde_json::Value::Object(details));
        response
    }
}
