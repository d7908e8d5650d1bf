//! Node parameter schema, serialized in the host's camelCase format.
//!
//! The host renders these entries in its UI and stores the values the user
//! enters; nodes only declare them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameter value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Json,
    Options,
}

/// One selectable value of an `options` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl PropertyOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
            action: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// Extra type constraints rendered by the host UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<bool>,
}

/// Visibility conditions: show the entry only when every named parameter has
/// one of the listed values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<String>>,
}

impl DisplayOptions {
    /// Visible when `resource` is selected.
    #[must_use]
    pub fn for_resource(resource: &str) -> Self {
        let mut show = BTreeMap::new();
        show.insert("resource".to_string(), vec![resource.to_string()]);
        Self { show }
    }

    /// Visible when both `resource` and `operation` are selected.
    #[must_use]
    pub fn for_operation(resource: &str, operation: &str) -> Self {
        let mut options = Self::for_resource(resource);
        options
            .show
            .insert("operation".to_string(), vec![operation.to_string()]);
        options
    }

    /// Returns true if the given selection makes the entry visible.
    #[must_use]
    pub fn is_visible(&self, selection: &BTreeMap<&str, &str>) -> bool {
        self.show.iter().all(|(name, allowed)| {
            selection
                .get(name.as_str())
                .is_some_and(|value| allowed.iter().any(|a| a == value))
        })
    }
}

/// One entry of a node's parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    pub default: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_options: Option<TypeOptions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PropertyOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl NodeProperty {
    /// Create an optional entry with a `null` default.
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>, kind: PropertyType) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: None,
            kind,
            required: false,
            no_data_expression: false,
            default: serde_json::Value::Null,
            type_options: None,
            options: Vec::new(),
            display_options: None,
        }
    }

    #[must_use]
    pub fn string(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyType::String).with_default("")
    }

    #[must_use]
    pub fn number(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyType::Number)
    }

    #[must_use]
    pub fn json(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyType::Json).with_default("")
    }

    #[must_use]
    pub fn options(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(name, display_name, PropertyType::Options)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = default.into();
        self
    }

    #[must_use]
    pub fn with_range(mut self, min_value: Option<i64>, max_value: Option<i64>) -> Self {
        let options = self.type_options.get_or_insert_with(TypeOptions::default);
        options.min_value = min_value;
        options.max_value = max_value;
        self
    }

    #[must_use]
    pub fn password(mut self) -> Self {
        self.type_options
            .get_or_insert_with(TypeOptions::default)
            .password = Some(true);
        self
    }

    #[must_use]
    pub fn with_option(mut self, option: PropertyOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use]
    pub fn with_display_options(mut self, display_options: DisplayOptions) -> Self {
        self.display_options = Some(display_options);
        self
    }

    /// Restrict visibility to a `(resource, operation)` pair.
    #[must_use]
    pub fn shown_for(self, resource: &str, operation: &str) -> Self {
        self.with_display_options(DisplayOptions::for_operation(resource, operation))
    }

    /// Returns true if `value` is one of the declared options.
    #[must_use]
    pub fn allows_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_host_format() {
        let property = NodeProperty::number("limit", "Limit")
            .required()
            .with_default(20)
            .with_range(Some(1), Some(60))
            .shown_for("document", "list");
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["displayName"], "Limit");
        assert_eq!(value["type"], "number");
        assert_eq!(value["typeOptions"]["minValue"], 1);
        assert_eq!(value["typeOptions"]["maxValue"], 60);
        assert_eq!(value["displayOptions"]["show"]["resource"][0], "document");
        assert_eq!(value["displayOptions"]["show"]["operation"][0], "list");
        assert!(value.get("options").is_none());
        assert!(value.get("noDataExpression").is_none());
    }

    #[test]
    fn visibility_requires_every_condition() {
        let options = DisplayOptions::for_operation("document", "create");
        let mut selection = BTreeMap::new();
        selection.insert("resource", "document");
        assert!(!options.is_visible(&selection));
        selection.insert("operation", "create");
        assert!(options.is_visible(&selection));
        selection.insert("operation", "list");
        assert!(!options.is_visible(&selection));
    }

    #[test]
    fn options_membership() {
        let property = NodeProperty::options("folderType", "Folder Type")
            .with_option(PropertyOption::new("Default", "DEFAULT"))
            .with_option(PropertyOption::new("Group", "GROUP"));
        assert!(property.allows_option("GROUP"));
        assert!(!property.allows_option("group"));
    }
}
