//! Move a document into a folder.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(
        RESOURCE,
        "moveToFolder",
        "Move to a folder",
        "Move a document to a folder",
        prepare,
    )
    .with_property(
        NodeProperty::string("documentId", "ID")
            .with_description("The ID of the document to move")
            .required(),
    )
    .with_property(
        NodeProperty::string("currentFolderId", "Current Folder ID").with_description(
            "The ID of the current folder the document is in. Is required if the document is currently in a folder",
        ),
    )
    .with_property(
        NodeProperty::string("folderId", "Folder ID")
            .with_description("The ID of the folder to move the document to")
            .required(),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let document_id = params.required_string("documentId", "Document ID")?;
    let current_folder_id = params.optional_id("currentFolderId");
    let folder_id = params.required_string("folderId", "Folder ID")?;

    let mut variables = Variables::new();
    variables.insert("document_id".into(), Value::String(document_id));
    variables.insert("current_folder_id".into(), current_folder_id);
    variables.insert("folder_id".into(), Value::String(folder_id));

    Ok(PreparedRequest::json(
        queries::MOVE_DOCUMENT_TO_FOLDER,
        variables,
        ResponseField::Whole,
    ))
}
