//! Resource definitions and their shared parameters.

pub mod document;
pub mod folder;

use flow_core::{NodeProperty, PropertyOption};

use crate::operation::MAX_LIMIT;

/// Page size parameter, default 20.
pub(crate) fn limit_property(noun: &str) -> NodeProperty {
    NodeProperty::number("limit", "Limit")
        .with_description(format!("The limit of {noun} to retrieve per page"))
        .required()
        .with_default(20)
        .with_range(Some(1), Some(MAX_LIMIT))
}

/// Page number parameter, default 1.
pub(crate) fn page_property(noun: &str) -> NodeProperty {
    NodeProperty::number("page", "Page")
        .with_description(format!("The page of {noun} to retrieve"))
        .required()
        .with_default(1)
        .with_range(Some(1), None)
}

/// Folder type selector.
pub(crate) fn folder_type_property(description: &str) -> NodeProperty {
    NodeProperty::options("folderType", "Folder Type")
        .with_description(description)
        .required()
        .with_default("DEFAULT")
        .with_option(PropertyOption::new("Default", "DEFAULT").with_description("User's folders"))
        .with_option(
            PropertyOption::new("Group", "GROUP").with_description("User's Group folders"),
        )
        .with_option(
            PropertyOption::new("Organization", "ORGANIZATION")
                .with_description("User's Organization folders"),
        )
}

/// Pretty JSON text used as the default of a JSON parameter.
pub(crate) fn json_default(example: &serde_json::Value) -> String {
    serde_json::to_string_pretty(example).unwrap_or_default()
}
