//! Process-wide resource registry.
//!
//! Built once on first use and read-only afterwards.

use std::sync::LazyLock;

use flow_core::{NodeError, NodeProperty, NodeResult};

use crate::operation::Operation;
use crate::resource::Resource;
use crate::resources;

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// The registry of every resource the node supports.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// An ordered collection of resources with unique names.
#[derive(Debug, Clone)]
pub struct Registry {
    resources: Vec<Resource>,
}

impl Registry {
    fn build() -> Self {
        Self::new(vec![resources::document::resource(), resources::folder::resource()])
    }

    /// Create a registry from resources.
    #[must_use]
    pub fn new(resources: Vec<Resource>) -> Self {
        debug_assert!(
            resources
                .iter()
                .enumerate()
                .all(|(i, r)| resources[..i].iter().all(|other| other.name() != r.name())),
            "duplicate resource"
        );
        Self { resources }
    }

    /// Resources in registration order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a resource by name.
    pub fn get_resource(&self, name: &str) -> NodeResult<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.name() == name)
            .ok_or_else(|| NodeError::unsupported_resource(name))
    }

    /// Look up a `(resource, operation)` pair.
    pub fn get_operation(&self, resource: &str, operation: &str) -> NodeResult<&Operation> {
        self.get_resource(resource)?.get_operation(operation)
    }

    /// The node's full parameter schema: the resource selector, then for each
    /// resource its operation selector followed by its operations' parameters.
    #[must_use]
    pub fn aggregated_properties(&self) -> Vec<NodeProperty> {
        let selector = self.resources.iter().fold(
            NodeProperty::options("resource", "Resource")
                .required()
                .no_data_expression(),
            |property, resource| property.with_option(resource.option()),
        );

        let mut properties = vec![selector];
        for resource in &self.resources {
            properties.push(resource.operation_property());
            properties.extend(resource.operations_properties());
        }
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_testkit::assert_unsupported_resource;

    #[test]
    fn resources_in_registration_order() {
        let names: Vec<_> = registry().resources().iter().map(Resource::name).collect();
        assert_eq!(names, ["document", "folder"]);
    }

    #[test]
    fn unknown_resource_is_rejected() {
        let err = registry().get_resource("invoice").unwrap_err();
        assert_unsupported_resource(&err, "invoice");
        assert_eq!(err.to_string(), "The resource 'invoice' is not supported");
    }

    #[test]
    fn lookup_by_pair() {
        let operation = registry().get_operation("folder", "getById").unwrap();
        assert_eq!(operation.resource(), "folder");
        assert!(registry().get_operation("folder", "addSigner").is_err());
    }

    #[test]
    fn resource_selector_comes_first() {
        let properties = registry().aggregated_properties();
        let selector = &properties[0];
        assert_eq!(selector.name, "resource");
        assert!(selector.required);
        assert!(selector.no_data_expression);
        assert!(selector.display_options.is_none());
        let values: Vec<_> = selector.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["document", "folder"]);
        assert_eq!(selector.options[0].name, "Document");
    }
}
