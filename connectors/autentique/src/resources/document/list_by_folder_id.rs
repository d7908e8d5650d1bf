//! List the documents of one folder.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::{limit_property, page_property};

pub(super) fn operation() -> Operation {
    Operation::new(
        RESOURCE,
        "listByFolderId",
        "List by folder ID",
        "List documents by folder ID",
        prepare,
    )
    .with_property(
        NodeProperty::string("folderId", "Folder ID")
            .with_description("The ID of the folder to list documents from")
            .required(),
    )
    .with_property(limit_property("documents"))
    .with_property(page_property("documents"))
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let folder_id = params.required_string("folderId", "Folder ID")?;
    let limit = params.limit()?;
    let page = params.page()?;

    let mut variables = Variables::new();
    variables.insert("folder_id".into(), Value::String(folder_id));
    variables.insert("limit".into(), Value::from(limit));
    variables.insert("page".into(), Value::from(page));

    Ok(PreparedRequest::json(
        queries::DOCUMENTS_BY_FOLDER,
        variables,
        ResponseField::Field("documentsByFolder"),
    ))
}
