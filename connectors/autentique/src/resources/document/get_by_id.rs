//! Fetch a single document.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "getById", "Get by ID", "Get a document by ID", prepare)
        .with_property(
            NodeProperty::string("documentId", "Document ID")
                .with_description("The ID of the document to retrieve")
                .required(),
        )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let id = params.required_string("documentId", "Document ID")?;

    let mut variables = Variables::new();
    variables.insert("id".into(), Value::String(id));

    Ok(PreparedRequest::json(
        queries::DOCUMENT,
        variables,
        ResponseField::Field("document"),
    ))
}
