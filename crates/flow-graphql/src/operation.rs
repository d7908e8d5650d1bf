//! Request and response envelope types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GraphqlClientError, GraphqlError};

/// GraphQL query wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphqlQuery {
    query: String,
}

impl GraphqlQuery {
    /// Create a new query from a string.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    /// Create a new query from a bundled document.
    #[must_use]
    pub fn from_static(query: &'static str) -> Self {
        Self::new(query)
    }

    /// Return the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.query
    }
}

/// Variables keyed by GraphQL argument name.
///
/// An explicit `null` entry is kept on the wire; omission and `null` mean
/// different things to the API.
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// GraphQL request payload: `{query, variables}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    /// Query text.
    pub query: GraphqlQuery,
    /// Variables.
    #[serde(default)]
    pub variables: Variables,
    /// Optional operation name.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    /// Create a new request.
    #[must_use]
    pub const fn new(query: GraphqlQuery, variables: Variables) -> Self {
        Self {
            query,
            variables,
            operation_name: None,
        }
    }

    /// Attach an operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Variable value, if set (including explicit `null`).
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&serde_json::Value> {
        self.variables.get(name)
    }
}

/// GraphQL response container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct GraphqlResponse<T> {
    /// Response data.
    #[serde(default)]
    pub data: Option<T>,
    /// GraphQL errors. `null` and absent are both treated as "no errors".
    /// Entries are parsed leniently so a non-standard payload still surfaces
    /// as a GraphQL error.
    #[serde(default, deserialize_with = "lenient_errors")]
    pub errors: Option<Vec<GraphqlError>>,
    /// Extensions payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl<T> GraphqlResponse<T> {
    /// Returns `true` if no GraphQL errors were returned.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.as_ref().is_none_or(Vec::is_empty)
    }

    /// Unwrap the envelope: a non-empty `errors` array wins over `data`.
    pub fn into_result(self) -> Result<T, GraphqlClientError> {
        match self.errors {
            Some(errors) if !errors.is_empty() => Err(GraphqlClientError::GraphqlErrors { errors }),
            _ => self.data.ok_or_else(|| GraphqlClientError::Protocol {
                message: "response carried neither data nor errors".to_string(),
            }),
        }
    }
}

fn lenient_errors<'de, D>(deserializer: D) -> Result<Option<Vec<GraphqlError>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Array(entries)) => {
            Some(entries.into_iter().map(GraphqlError::from_value).collect())
        }
        Some(entry) => Some(vec![GraphqlError::from_value(entry)]),
    })
}

/// Decode and unwrap a response body.
pub fn decode_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, GraphqlClientError> {
    let response: GraphqlResponse<T> = serde_json::from_slice(bytes)?;
    response.into_result()
}
