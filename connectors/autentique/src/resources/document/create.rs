//! Create a document from an uploaded file.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::{Value, json};

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::json_default;

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "create", "Create", "Create a document", prepare)
        .with_property(
            NodeProperty::string("documentName", "Document Name")
                .with_description("The name of the document to be created")
                .required(),
        )
        .with_property(
            NodeProperty::string("documentOrganizationId", "Document Organization ID")
                .with_description("The ID of the organization which the created document will belong"),
        )
        .with_property(
            NodeProperty::string("documentFolderId", "Document Folder ID")
                .with_description("The ID of the folder which the created document will belong"),
        )
        .with_property(
            NodeProperty::json("documentOptionalFields", "Document Optional Fields (JSON)")
                .with_description("The additional optional fields JSON object for the document")
                .with_default(json_default(&optional_fields_example())),
        )
        .with_property(
            NodeProperty::json("documentSigners", "Document Signers (JSON Array)")
                .with_description("The signers JSON array for the document")
                .required()
                .with_default(json_default(&signers_example())),
        )
        .with_property(
            NodeProperty::string("documentBinaryPropertyName", "Document Binary Property Name")
                .with_description("The name of the binary property which contains the document file")
                .required()
                .with_default("data"),
        )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let name = params.required_string("documentName", "Document Name")?;
    let organization_id = numeric_id(params.optional_id("documentOrganizationId"));
    let folder_id = params.optional_id("documentFolderId");
    let optional_fields =
        params.optional_json_object("documentOptionalFields", "Document Optional Fields")?;
    let signers = params.required_json_array("documentSigners", "Document Signers")?;
    let file =
        params.upload_file("documentBinaryPropertyName", "Document Binary Property Name")?;

    // Optional fields are spread after the name and may override it.
    let mut document = serde_json::Map::new();
    document.insert("name".into(), Value::String(name));
    document.extend(optional_fields);

    let mut variables = Variables::new();
    variables.insert("organization_id".into(), organization_id);
    variables.insert("folder_id".into(), folder_id);
    variables.insert("document".into(), Value::Object(document));
    variables.insert("signers".into(), Value::Array(signers));
    variables.insert("file".into(), Value::Null);

    Ok(PreparedRequest::multipart(
        queries::CREATE_DOCUMENT,
        variables,
        file,
        ResponseField::Field("createDocument"),
    ))
}

/// Organization IDs are integers on the API side.
fn numeric_id(value: Value) -> Value {
    match &value {
        Value::String(s) => s.trim().parse::<i64>().map_or(value, Value::from),
        _ => value,
    }
}

fn optional_fields_example() -> Value {
    json!({
        "message": "Custom message to signers",
        "reminder": "WEEKLY",
        "sortable": true,
        "footer": "BOTTOM",
        "refusable": true,
        "qualified": true,
        "scrolling_required": true,
        "stop_on_rejected": true,
        "new_signature_style": true,
        "show_audit_page": false,
        "ignore_cpf": true,
        "ignore_birthdate": true,
        "email_template_id": 1234,
        "deadline_at": "2023-11-24T02:59:59.999Z",
        "reply_to": "email@domain.org",
        "cc": [{"email": "cc@domain.org"}],
        "expiration": {"days_before": 7, "notify_at": "20/01/2026"},
        "configs": {
            "notification_finished": true,
            "notification_signed": true,
            "signature_appearance": "ELETRONIC",
            "keep_metadata": true,
            "lock_user_data": true,
            "pdfa": true
        },
        "locale": {
            "country": "BR",
            "language": "pt-BR",
            "timezone": "America/Sao_Paulo",
            "date_format": "DD_MM_YYYY"
        }
    })
}

fn signers_example() -> Value {
    json!([{
        "name": "John Doe",
        "email": "johndoe@domain.org",
        "phone": "+5599999999999",
        "delivery_method": "DELIVERY_METHOD_LINK",
        "action": "SIGN",
        "positions": [{"x": 5, "y": 90, "z": 1}]
    }])
}
