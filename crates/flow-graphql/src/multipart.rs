//! GraphQL multipart file upload.
//!
//! Three form fields, in order:
//! - `operations`: JSON `{query, variables}` with the file variable set to `null`
//! - `map`: JSON `{"file": ["variables.file"]}`
//! - `file`: the raw bytes, tagged with file name and content type

use reqwest::multipart::{Form, Part};

use crate::error::GraphqlClientError;
use crate::operation::GraphqlRequest;

/// Form field and variable name of the uploaded file.
pub const FILE_FIELD: &str = "file";

/// A file to attach to a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Decoded file content.
    pub bytes: Vec<u8>,
    /// File name sent in the part's content disposition.
    pub file_name: String,
    /// Content type of the part.
    pub mime_type: String,
}

impl UploadFile {
    #[must_use]
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// A mutation plus the file it uploads.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartUpload {
    operations: GraphqlRequest,
    file: UploadFile,
}

impl MultipartUpload {
    /// Pair a request with a file. The `file` variable is forced to `null`.
    #[must_use]
    pub fn new(mut operations: GraphqlRequest, file: UploadFile) -> Self {
        operations
            .variables
            .insert(FILE_FIELD.to_string(), serde_json::Value::Null);
        Self { operations, file }
    }

    /// The `operations` payload.
    #[must_use]
    pub const fn operations(&self) -> &GraphqlRequest {
        &self.operations
    }

    /// The attached file.
    #[must_use]
    pub const fn file(&self) -> &UploadFile {
        &self.file
    }

    /// JSON text of the `operations` field.
    pub fn operations_json(&self) -> Result<String, GraphqlClientError> {
        Ok(serde_json::to_string(&self.operations)?)
    }

    /// JSON text of the `map` field.
    #[must_use]
    pub fn map_json() -> String {
        serde_json::json!({ FILE_FIELD: [format!("variables.{FILE_FIELD}")] }).to_string()
    }

    /// Build the multipart form.
    pub fn into_form(self) -> Result<Form, GraphqlClientError> {
        let operations = self.operations_json()?;
        let UploadFile {
            bytes,
            file_name,
            mime_type,
        } = self.file;
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(|e| GraphqlClientError::Build {
                message: format!("invalid content type '{mime_type}': {e}"),
            })?;

        Ok(Form::new()
            .text("operations", operations)
            .text("map", Self::map_json())
            .part(FILE_FIELD, part))
    }
}
