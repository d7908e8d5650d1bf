//! Delete a document.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "delete", "Delete", "Delete a document", prepare).with_property(
        NodeProperty::string("documentId", "Document ID")
            .with_description("The ID of the document to delete")
            .required(),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let id = params.required_string("documentId", "Document ID")?;

    let mut variables = Variables::new();
    variables.insert("id".into(), Value::String(id));

    Ok(PreparedRequest::json(
        queries::DELETE_DOCUMENT,
        variables,
        ResponseField::Whole,
    ))
}
