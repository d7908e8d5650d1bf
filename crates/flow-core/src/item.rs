//! Item data model: output records and binary attachments.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::{NodeError, NodeOperationError, NodeResult};

/// One output record, tagged with the input item it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionData {
    /// Unwrapped API payload, or `{}` for a degraded item.
    pub json: serde_json::Value,

    /// Failure that replaced this item's payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<NodeOperationError>,

    /// Index of the originating input item.
    pub paired_item: usize,
}

impl NodeExecutionData {
    /// A successful record.
    #[must_use]
    pub const fn success(json: serde_json::Value, paired_item: usize) -> Self {
        Self {
            json,
            error: None,
            paired_item,
        }
    }

    /// A degraded record carrying an error in place of data.
    #[must_use]
    pub fn failure(error: NodeOperationError) -> Self {
        Self {
            json: serde_json::Value::Object(serde_json::Map::new()),
            paired_item: error.item_index,
            error: Some(error),
        }
    }

    /// Returns true if this record carries an error.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A binary attachment as the host stores it: base64 payload plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Base64-encoded file content.
    pub data: String,

    /// Original file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// MIME type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl BinaryData {
    /// Build an attachment from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], file_name: Option<&str>, mime_type: Option<&str>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            file_name: file_name.map(String::from),
            mime_type: mime_type.map(String::from),
        }
    }

    /// Decode the payload from base64.
    pub fn decode(&self, property: &str) -> NodeResult<Vec<u8>> {
        STANDARD
            .decode(self.data.trim())
            .map_err(|e| NodeError::InvalidBinaryData {
                property: property.to_string(),
                message: e.to_string(),
            })
    }

    /// File name, falling back to a generic one.
    #[must_use]
    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().unwrap_or("file")
    }

    /// MIME type, falling back to `application/octet-stream`.
    #[must_use]
    pub fn mime_type_or_default(&self) -> &str {
        self.mime_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }
}
