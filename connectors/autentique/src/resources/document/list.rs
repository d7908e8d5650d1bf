//! List documents, one page at a time.

use flow_core::NodeResult;
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::{limit_property, page_property};

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "list", "List", "List documents", prepare)
        .with_property(limit_property("documents"))
        .with_property(page_property("documents"))
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let limit = params.limit()?;
    let page = params.page()?;

    let mut variables = Variables::new();
    variables.insert("limit".into(), Value::from(limit));
    variables.insert("page".into(), Value::from(page));

    Ok(PreparedRequest::json(
        queries::DOCUMENTS,
        variables,
        ResponseField::Field("documents"),
    ))
}
