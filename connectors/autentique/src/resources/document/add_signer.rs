//! Add a signer to an existing document.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::{Value, json};

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::json_default;

pub(super) fn operation() -> Operation {
    Operation::new(
        RESOURCE,
        "addSigner",
        "Add a signer",
        "Add a signer to a document",
        prepare,
    )
    .with_property(
        NodeProperty::string("documentId", "Document ID")
            .with_description("The ID of the document to add the signer to")
            .required(),
    )
    .with_property(
        NodeProperty::json("documentSigner", "Document Signer (JSON)")
            .with_description("The signer JSON object to add to the document")
            .required()
            .with_default(json_default(&json!({
                "name": "John Doe",
                "email": "johndoe@domain.org",
                "action": "SIGN",
                "positions": [{"x": 5, "y": 90, "z": 1}]
            }))),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let document_id = params.required_string("documentId", "Document ID")?;
    let signer = params.required_json_object("documentSigner", "Document Signer")?;

    let mut variables = Variables::new();
    variables.insert("document_id".into(), Value::String(document_id));
    variables.insert("signer".into(), Value::Object(signer));

    Ok(PreparedRequest::json(
        queries::CREATE_SIGNER,
        variables,
        ResponseField::Field("createSigner"),
    ))
}
