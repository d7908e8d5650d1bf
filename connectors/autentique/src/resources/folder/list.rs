//! List folders of a given type.

use flow_core::NodeResult;
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::{folder_type_property, limit_property, page_property};

const FOLDER_TYPE_DESCRIPTION: &str = "The type of folders to list";

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "list", "List", "List folders", prepare)
        .with_property(folder_type_property(FOLDER_TYPE_DESCRIPTION))
        .with_property(limit_property("folders"))
        .with_property(page_property("folders"))
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let folder_type = params.required_option(&folder_type_property(FOLDER_TYPE_DESCRIPTION))?;
    let limit = params.limit()?;
    let page = params.page()?;

    let mut variables = Variables::new();
    variables.insert("type".into(), Value::String(folder_type));
    variables.insert("limit".into(), Value::from(limit));
    variables.insert("page".into(), Value::from(page));

    Ok(PreparedRequest::json(
        queries::FOLDERS,
        variables,
        ResponseField::Field("folders"),
    ))
}
