//! A named group of operations.

use flow_core::{DisplayOptions, NodeError, NodeProperty, NodeResult, PropertyOption};

use crate::operation::Operation;

/// A resource such as `document` or `folder`.
#[derive(Debug, Clone)]
pub struct Resource {
    name: &'static str,
    display_name: &'static str,
    operations: Vec<Operation>,
}

impl Resource {
    /// Create a resource. Operation names must be unique within it.
    #[must_use]
    pub fn new(name: &'static str, display_name: &'static str, operations: Vec<Operation>) -> Self {
        debug_assert!(
            operations
                .iter()
                .enumerate()
                .all(|(i, op)| operations[..i].iter().all(|other| other.name() != op.name())),
            "duplicate operation in resource '{name}'"
        );
        Self {
            name,
            display_name,
            operations,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Operations in registration order.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Look up an operation by name.
    pub fn get_operation(&self, name: &str) -> NodeResult<&Operation> {
        self.operations
            .iter()
            .find(|operation| operation.name() == name)
            .ok_or_else(|| NodeError::unsupported_operation(self.name, name))
    }

    /// Entry in the resource selector.
    #[must_use]
    pub fn option(&self) -> PropertyOption {
        PropertyOption::new(self.display_name, self.name)
    }

    /// The operation selector, visible when this resource is selected.
    #[must_use]
    pub fn operation_property(&self) -> NodeProperty {
        self.operations.iter().fold(
            NodeProperty::options("operation", "Operation")
                .required()
                .no_data_expression()
                .with_display_options(DisplayOptions::for_resource(self.name)),
            |property, operation| property.with_option(operation.option()),
        )
    }

    /// Every operation's parameters, concatenated in registration order.
    #[must_use]
    pub fn operations_properties(&self) -> Vec<NodeProperty> {
        self.operations
            .iter()
            .flat_map(|operation| operation.properties().iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{ItemParameters, PreparedRequest};

    fn unreachable_prepare(_: &ItemParameters<'_>) -> NodeResult<PreparedRequest> {
        Err(NodeError::Internal {
            message: "not called".into(),
        })
    }

    fn resource() -> Resource {
        Resource::new(
            "widget",
            "Widget",
            vec![
                Operation::new("widget", "list", "List", "List widgets", unreachable_prepare)
                    .with_property(NodeProperty::number("limit", "Limit")),
                Operation::new("widget", "get", "Get", "Get a widget", unreachable_prepare)
                    .with_property(NodeProperty::string("widgetId", "Widget ID"))
                    .with_property(NodeProperty::string("expand", "Expand")),
            ],
        )
    }

    #[test]
    fn get_operation_names_resource_and_operation() {
        let resource = resource();
        assert_eq!(resource.get_operation("get").unwrap().name(), "get");
        let err = resource.get_operation("archive").unwrap_err();
        assert_eq!(
            err.to_string(),
            "The operation 'archive' is not supported by resource 'widget'"
        );
    }

    #[test]
    fn properties_keep_registration_order() {
        let names: Vec<_> = resource()
            .operations_properties()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["limit", "widgetId", "expand"]);
    }

    #[test]
    fn operation_selector_lists_operations() {
        let property = resource().operation_property();
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["name"], "operation");
        assert_eq!(value["noDataExpression"], true);
        assert_eq!(value["displayOptions"]["show"]["resource"][0], "widget");
        assert!(value["displayOptions"]["show"].get("operation").is_none());
        assert_eq!(value["options"][1]["value"], "get");
        assert_eq!(value["options"][1]["action"], "Get a widget");
        assert!(value["default"].is_null());
    }
}
