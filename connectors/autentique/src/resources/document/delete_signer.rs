//! Remove a signer from a document.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(
        RESOURCE,
        "deleteSigner",
        "Delete a signer",
        "Delete a signer from a document",
        prepare,
    )
    .with_property(
        NodeProperty::string("documentId", "Document ID")
            .with_description("The ID of the document to remove the signer from")
            .required(),
    )
    .with_property(
        NodeProperty::string("signerId", "Signer ID (public_id)")
            .with_description("The public_id of the signer to remove")
            .required(),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let document_id = params.required_string("documentId", "Document ID")?;
    let public_id = params.required_string("signerId", "Signer ID")?;

    let mut variables = Variables::new();
    variables.insert("document_id".into(), Value::String(document_id));
    variables.insert("public_id".into(), Value::String(public_id));

    Ok(PreparedRequest::json(
        queries::DELETE_SIGNER,
        variables,
        ResponseField::Whole,
    ))
}
