//! Delete a folder.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "delete", "Delete", "Delete a Folder", prepare).with_property(
        NodeProperty::string("folderId", "Folder ID")
            .with_description("The ID of the folder to delete")
            .required(),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let id = params.required_string("folderId", "Folder ID")?;

    let mut variables = Variables::new();
    variables.insert("id".into(), Value::String(id));

    Ok(PreparedRequest::json(
        queries::DELETE_FOLDER,
        variables,
        ResponseField::Whole,
    ))
}
