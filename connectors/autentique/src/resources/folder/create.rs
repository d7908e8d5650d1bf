//! Create a folder.

use flow_core::{NodeProperty, NodeResult};
use flow_graphql::Variables;
use serde_json::{Value, json};

use super::RESOURCE;
use crate::operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
use crate::queries;
use crate::resources::folder_type_property;

const FOLDER_TYPE_DESCRIPTION: &str = "The type of folder to create";

pub(super) fn operation() -> Operation {
    Operation::new(RESOURCE, "create", "Create", "Create a folder", prepare)
        .with_property(
            NodeProperty::string("folderName", "Folder Name")
                .with_description("The name of the folder to be created")
                .required()
                .with_default("Folder"),
        )
        .with_property(folder_type_property(FOLDER_TYPE_DESCRIPTION))
}

fn prepare(params: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
    let name = params.required_string("folderName", "Folder Name")?;
    let folder_type = params.required_option(&folder_type_property(FOLDER_TYPE_DESCRIPTION))?;

    let mut variables = Variables::new();
    variables.insert("folder".into(), json!({ "name": name }));
    variables.insert("type".into(), Value::String(folder_type));

    Ok(PreparedRequest::json(
        queries::CREATE_FOLDER,
        variables,
        ResponseField::Field("createFolder"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_testkit::{MockExecuteContext, assert_validation_error};

    fn prepare_with(parameters: Value) -> NodeResult<PreparedRequest> {
        operation().prepare(&MockExecuteContext::new().with_item(parameters), 0)
    }

    #[test]
    fn builds_folder_input() {
        let prepared = prepare_with(json!({"folderName": "Contracts", "folderType": "GROUP"})).unwrap();
        assert_eq!(prepared.variable("folder"), Some(&json!({"name": "Contracts"})));
        assert_eq!(prepared.variable("type"), Some(&json!("GROUP")));
        assert_eq!(prepared.response_field, ResponseField::Field("createFolder"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = prepare_with(json!({"folderName": "Contracts", "folderType": "SHARED"})).unwrap_err();
        assert_validation_error(&err, "folderType");
        assert_eq!(
            err.to_string(),
            "Folder Type should be one of DEFAULT, GROUP, ORGANIZATION"
        );
    }

    #[test]
    fn name_defaults_to_folder() {
        assert_eq!(operation().properties()[0].default, "Folder");
        assert_eq!(operation().properties()[1].default, "DEFAULT");
    }
}
