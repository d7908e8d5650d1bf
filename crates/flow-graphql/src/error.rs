//! Error types for the GraphQL request sender.

use flow_core::NodeError;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HTTP error information captured from reqwest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorInfo {
    /// Error message.
    pub message: String,
    /// HTTP status code (if available).
    pub status_code: Option<u16>,
    /// Whether the error was a timeout.
    pub is_timeout: bool,
    /// Whether the error was a connection failure.
    pub is_connect: bool,
}

impl From<reqwest::Error> for HttpErrorInfo {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            status_code: err.status().map(|status| status.as_u16()),
            is_timeout: err.is_timeout(),
            is_connect: err.is_connect(),
        }
    }
}

/// GraphQL error location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlErrorLocation {
    /// Line number in the query (1-based).
    pub line: u32,
    /// Column number in the query (1-based).
    pub column: u32,
}

/// GraphQL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphqlPathSegment {
    /// Field name.
    Key(String),
    /// Array index.
    Index(i64),
}

/// GraphQL error entry, as returned in the `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    /// Human-readable error message. Some servers omit it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Location(s) within the query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphqlErrorLocation>,
    /// Path within the response where the error occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<GraphqlPathSegment>,
    /// Extensions metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
    /// Vendor fields outside the GraphQL spec, kept verbatim.
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl GraphqlError {
    /// Create an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
            extensions: None,
            other: serde_json::Map::new(),
        }
    }

    /// Parse one `errors` entry. An entry that does not fit the standard
    /// shape is kept verbatim in [`Self::other`].
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        if let Ok(error) = serde_json::from_value::<Self>(value.clone()) {
            return error;
        }
        let other = match value {
            serde_json::Value::Object(map) => map,
            value => {
                let mut map = serde_json::Map::new();
                map.insert("error".to_string(), value);
                map
            }
        };
        Self {
            other,
            ..Self::new(String::new())
        }
    }
}

/// Error type for request sender operations.
#[derive(Debug, Clone, Error)]
pub enum GraphqlClientError {
    /// HTTP/network error.
    #[error("{}", .0.message)]
    Http(HttpErrorInfo),

    /// HTTP response status error.
    #[error("HTTP status {status} with body: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: StatusCode,
        /// Response body (truncated if needed).
        body: String,
    },

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(String),

    /// GraphQL-level errors returned by the server.
    #[error("{}", serialize_errors(errors))]
    GraphqlErrors {
        /// GraphQL error list.
        errors: Vec<GraphqlError>,
    },

    /// GraphQL protocol violation (e.g. neither `data` nor `errors`).
    #[error("GraphQL protocol error: {message}")]
    Protocol {
        /// Details.
        message: String,
    },

    /// The request could not be authenticated or assembled.
    #[error("Request build error: {message}")]
    Build {
        /// Details.
        message: String,
    },
}

fn serialize_errors(errors: &[GraphqlError]) -> String {
    serde_json::to_string(errors).unwrap_or_else(|_| "GraphQL error".to_string())
}

impl From<reqwest::Error> for GraphqlClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(HttpErrorInfo::from(err))
    }
}

impl From<serde_json::Error> for GraphqlClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl GraphqlClientError {
    /// HTTP status code, if the failure carried one.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(info) => info.status_code,
            Self::HttpStatus { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }

    /// Convert into the node error taxonomy.
    ///
    /// GraphQL `errors` become [`NodeError::Api`] carrying the serialized
    /// payload; every other failure becomes [`NodeError::Transport`].
    #[must_use]
    pub fn to_node_error(&self) -> NodeError {
        match self {
            Self::GraphqlErrors { errors } => NodeError::Api {
                message: self.to_string(),
                errors: serde_json::to_value(errors).unwrap_or(serde_json::Value::Null),
            },
            _ => NodeError::Transport {
                message: self.to_string(),
                status_code: self.status_code(),
            },
        }
    }
}

impl From<GraphqlClientError> for NodeError {
    fn from(err: GraphqlClientError) -> Self {
        err.to_node_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_serialize_payload_into_message() {
        let err = GraphqlClientError::GraphqlErrors {
            errors: vec![GraphqlError::new("x")],
        };
        assert_eq!(err.to_string(), r#"[{"message":"x"}]"#);

        let node_err = err.to_node_error();
        assert_eq!(
            node_err.to_string(),
            r#"Error while sending request. Message: [{"message":"x"}]"#
        );
        match node_err {
            NodeError::Api { errors, .. } => assert_eq!(errors[0]["message"], "x"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn vendor_fields_survive_roundtrip() {
        let error: GraphqlError = serde_json::from_value(serde_json::json!({
            "message": "validation",
            "extensions": {"category": "validation"},
            "validation": {"signers.0.email": ["invalid"]}
        }))
        .unwrap();
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["validation"]["signers.0.email"][0], "invalid");
        assert_eq!(value["extensions"]["category"], "validation");
    }

    #[test]
    fn message_is_optional() {
        let error = GraphqlError::from_value(serde_json::json!({"code": "UNAUTHENTICATED"}));
        assert!(error.message.is_empty());
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            serde_json::json!({"code": "UNAUTHENTICATED"})
        );
    }

    #[test]
    fn malformed_entries_are_kept_verbatim() {
        let entry = serde_json::json!({"message": "bad", "locations": "nowhere"});
        let error = GraphqlError::from_value(entry.clone());
        assert_eq!(serde_json::to_value(&error).unwrap(), entry);

        let error = GraphqlError::from_value(serde_json::json!("plain text"));
        assert_eq!(error.other["error"], "plain text");
    }

    #[test]
    fn status_errors_map_to_transport() {
        let err = GraphqlClientError::HttpStatus {
            status: StatusCode::UNAUTHORIZED,
            body: "Unauthenticated.".into(),
        };
        match err.to_node_error() {
            NodeError::Transport {
                message,
                status_code,
            } => {
                assert_eq!(status_code, Some(401));
                assert!(message.contains("Unauthenticated."));
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }
}
