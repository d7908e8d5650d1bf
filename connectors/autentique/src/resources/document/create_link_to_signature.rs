//! Create a signing link for a signer.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::Value;

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;

pub(super) fn operation() -> Operation {
    Operation::new(
        RESOURCE,
        "createLinkToSignature",
        "Create a link to signature",
        "Create a link to signature for a signer",
        prepare,
    )
    .with_property(
        NodeProperty::string("signerId", "Signer ID (public_id)")
            .with_description("The public_id of the signer to create the link for")
            .required(),
    )
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let public_id = params.required_string("signerId", "Signer ID")?;

    let mut variables = Variables::new();
    variables.insert("public_id".into(), Value::String(public_id));

    Ok(PreparedRequest::json(
        queries::CREATE_LINK_TO_SIGNATURE,
        variables,
        ResponseField::Field("createLinkToSignature"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_testkit::MockExecuteContext;
    use serde_json::json;

    #[test]
    fn sends_public_id() {
        let ctx = MockExecuteContext::new().with_item(json!({"signerId": "pub-1"}));
        let prepared = operation().prepare(&ctx, 0).unwrap();
        assert_eq!(prepared.variable("public_id"), Some(&json!("pub-1")));
        assert_eq!(
            prepared.response_field.extract(json!({"createLinkToSignature": {"short_link": "x"}})),
            json!({"short_link": "x"})
        );
    }
}
