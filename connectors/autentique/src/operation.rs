//! Operation descriptors and per-item parameter validation.
//!
//! An [`Operation`] is data plus one function: its parameter schema and a
//! `prepare` handler that turns validated item parameters into a
//! [`PreparedRequest`]. Preparing never touches the network, so every
//! validation failure happens before a request is sent.

use flow_core::{
    BinaryData, ExecuteFunctions, NodeError, NodeProperty, NodeResult, PropertyOption,
};
use flow_graphql::{GraphqlQuery, GraphqlRequest, UploadFile, Variables};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::AutentiqueClient;
use crate::credentials::AutentiqueApi;

/// Largest page size the API accepts.
pub const MAX_LIMIT: i64 = 60;

/// Largest integer the API's `Int` scalar accepts.
const MAX_INT: i64 = i32::MAX as i64;

/// Builds the request for one item.
pub type PrepareFn = fn(&ItemParameters<'_>) -> NodeResult<PreparedRequest>;

/// Part of the response `data` returned as the item's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    /// A single top-level field, e.g. `createDocument`.
    Field(&'static str),
    /// The whole `data` object.
    Whole,
}

impl ResponseField {
    /// Extract the output from `data`. A missing field yields `null`.
    #[must_use]
    pub fn extract(self, data: Value) -> Value {
        match self {
            Self::Whole => data,
            Self::Field(name) => match data {
                Value::Object(mut map) => map.remove(name).unwrap_or(Value::Null),
                _ => Value::Null,
            },
        }
    }
}

/// A request ready to send: JSON body or multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub request: GraphqlRequest,
    pub upload: Option<UploadFile>,
    pub response_field: ResponseField,
}

impl PreparedRequest {
    /// A plain `{query, variables}` request.
    #[must_use]
    pub fn json(query: &'static str, variables: Variables, response_field: ResponseField) -> Self {
        Self {
            request: GraphqlRequest::new(GraphqlQuery::from_static(query), variables),
            upload: None,
            response_field,
        }
    }

    /// A multipart request uploading `file`.
    #[must_use]
    pub fn multipart(
        query: &'static str,
        variables: Variables,
        file: UploadFile,
        response_field: ResponseField,
    ) -> Self {
        Self {
            upload: Some(file),
            ..Self::json(query, variables, response_field)
        }
    }

    /// Variable value, if set.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.request.variable(name)
    }
}

/// One operation of a resource.
#[derive(Debug, Clone)]
pub struct Operation {
    resource: &'static str,
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    properties: Vec<NodeProperty>,
    prepare: PrepareFn,
}

impl Operation {
    #[must_use]
    pub const fn new(
        resource: &'static str,
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        prepare: PrepareFn,
    ) -> Self {
        Self {
            resource,
            name,
            display_name,
            description,
            properties: Vec::new(),
            prepare,
        }
    }

    /// Declare a parameter, visible only when this operation is selected.
    #[must_use]
    pub fn with_property(mut self, property: NodeProperty) -> Self {
        self.properties
            .push(property.shown_for(self.resource, self.name));
        self
    }

    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        self.display_name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Parameter schema entries, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[NodeProperty] {
        &self.properties
    }

    /// Entry in the resource's operation selector.
    #[must_use]
    pub fn option(&self) -> PropertyOption {
        PropertyOption::new(self.display_name, self.name)
            .with_description(self.description)
            .with_action(self.description)
    }

    /// Validate the item's parameters and build its request.
    pub fn prepare(&self, ctx: &dyn ExecuteFunctions, item_index: usize) -> NodeResult<PreparedRequest> {
        (self.prepare)(&ItemParameters::new(ctx, item_index))
    }

    /// Run the operation for one item and return its output.
    #[instrument(skip(self, ctx, client), fields(resource = self.resource, operation = self.name))]
    pub async fn execute(
        &self,
        ctx: &dyn ExecuteFunctions,
        item_index: usize,
        client: &AutentiqueClient,
    ) -> NodeResult<Value> {
        let prepared = self.prepare(ctx, item_index)?;
        let auth = AutentiqueApi::authenticator(&ctx.credentials(AutentiqueApi::NAME)?)?;
        let response_field = prepared.response_field;
        debug!(multipart = prepared.upload.is_some(), "sending request");
        let data = client.send(prepared, &auth).await?;
        Ok(response_field.extract(data))
    }
}

/// Typed, validating access to one item's parameters.
pub struct ItemParameters<'a> {
    ctx: &'a dyn ExecuteFunctions,
    item_index: usize,
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl<'a> ItemParameters<'a> {
    #[must_use]
    pub fn new(ctx: &'a dyn ExecuteFunctions, item_index: usize) -> Self {
        Self { ctx, item_index }
    }

    #[must_use]
    pub const fn item_index(&self) -> usize {
        self.item_index
    }

    /// Raw parameter value.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<Value> {
        self.ctx.node_parameter(name, self.item_index)
    }

    /// A non-blank string. Numbers are accepted and rendered as text.
    pub fn required_string(&self, name: &str, label: &str) -> NodeResult<String> {
        match self.raw(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(value) if !is_blank(&value) => Err(NodeError::validation(
                name,
                format!("{label} should be a string"),
            )),
            _ => Err(NodeError::validation(name, format!("{label} is required"))),
        }
    }

    /// An optional ID: absent or blank becomes `null`, never `""`.
    #[must_use]
    pub fn optional_id(&self, name: &str) -> Value {
        match self.raw(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Value::String(s),
            Some(value @ Value::Number(_)) => value,
            _ => Value::Null,
        }
    }

    /// A JSON parameter that must be present. Strings are parsed as JSON.
    pub fn required_json(&self, name: &str, label: &str) -> NodeResult<Value> {
        match self.raw(name) {
            Some(value) if !is_blank(&value) => parse_json(name, label, value),
            _ => Err(NodeError::validation(name, format!("{label} is required"))),
        }
    }

    /// A required JSON object.
    pub fn required_json_object(
        &self,
        name: &str,
        label: &str,
    ) -> NodeResult<serde_json::Map<String, Value>> {
        match self.required_json(name, label)? {
            Value::Object(map) => Ok(map),
            _ => Err(NodeError::validation(
                name,
                format!("{label} should be a JSON object"),
            )),
        }
    }

    /// A required, non-empty JSON array.
    pub fn required_json_array(&self, name: &str, label: &str) -> NodeResult<Vec<Value>> {
        match self.required_json(name, label)? {
            Value::Array(items) if items.is_empty() => {
                Err(NodeError::validation(name, format!("{label} is required")))
            }
            Value::Array(items) => Ok(items),
            _ => Err(NodeError::validation(
                name,
                format!("{label} should be a JSON array"),
            )),
        }
    }

    /// An optional JSON object: absent or blank becomes `{}`.
    pub fn optional_json_object(
        &self,
        name: &str,
        label: &str,
    ) -> NodeResult<serde_json::Map<String, Value>> {
        match self.raw(name) {
            Some(value) if !is_blank(&value) => match parse_json(name, label, value)? {
                Value::Object(map) => Ok(map),
                _ => Err(NodeError::validation(
                    name,
                    format!("{label} should be a JSON object"),
                )),
            },
            _ => Ok(serde_json::Map::new()),
        }
    }

    /// A positive integer that fits the API's 32-bit `Int`. Zero, negative
    /// or missing is a validation error.
    #[allow(clippy::cast_possible_truncation)]
    pub fn positive_integer(&self, name: &str, label: &str) -> NodeResult<i64> {
        let required = || {
            NodeError::validation(
                name,
                format!("{label} is required and should be greater than 0"),
            )
        };
        let not_integer =
            || NodeError::validation(name, format!("{label} should be an integer"));
        let too_large = || {
            NodeError::validation(
                name,
                format!("{label} should be less than or equal to {MAX_INT}"),
            )
        };

        let number = match self.raw(name) {
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(number), _) => number,
                (None, Some(f)) if f.is_finite() && f.fract() == 0.0 => {
                    if f < 1.0 {
                        return Err(required());
                    }
                    if f > f64::from(i32::MAX) {
                        return Err(too_large());
                    }
                    f as i64
                }
                _ => return Err(not_integer()),
            },
            Some(Value::String(s)) if !s.trim().is_empty() => {
                let text = s.trim();
                match text.parse::<i64>() {
                    Ok(number) => number,
                    Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                        return Err(too_large());
                    }
                    Err(_) => return Err(not_integer()),
                }
            }
            _ => return Err(required()),
        };
        if number <= 0 {
            return Err(required());
        }
        if number > MAX_INT {
            return Err(too_large());
        }
        Ok(number)
    }

    /// Page size, between 1 and [`MAX_LIMIT`].
    pub fn limit(&self) -> NodeResult<i64> {
        let limit = self.positive_integer("limit", "Limit")?;
        if limit > MAX_LIMIT {
            return Err(NodeError::validation(
                "limit",
                format!("Limit should be less than or equal to {MAX_LIMIT}"),
            ));
        }
        Ok(limit)
    }

    /// Page number, starting at 1.
    pub fn page(&self) -> NodeResult<i64> {
        self.positive_integer("page", "Page")
    }

    /// One of the declared option values.
    pub fn required_option(&self, property: &NodeProperty) -> NodeResult<String> {
        let value = self.required_string(&property.name, &property.display_name)?;
        if !property.allows_option(&value) {
            let allowed: Vec<_> = property.options.iter().map(|o| o.value.as_str()).collect();
            return Err(NodeError::validation(
                property.name.clone(),
                format!(
                    "{} should be one of {}",
                    property.display_name,
                    allowed.join(", ")
                ),
            ));
        }
        Ok(value)
    }

    /// The binary attachment named by parameter `name`, decoded for upload.
    pub fn upload_file(&self, name: &str, label: &str) -> NodeResult<UploadFile> {
        let property = self.required_string(name, label)?;
        let binary: BinaryData = self.ctx.binary_data(self.item_index, &property)?;
        Ok(UploadFile::new(
            binary.decode(&property)?,
            binary.file_name_or_default(),
            binary.mime_type_or_default(),
        ))
    }
}

fn parse_json(name: &str, label: &str, value: Value) -> NodeResult<Value> {
    match value {
        Value::String(text) => serde_json::from_str(&text).map_err(|e| {
            NodeError::validation(name, format!("{label} is not valid JSON: {e}"))
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_testkit::{MockExecuteContext, assert_validation_error};
    use serde_json::json;

    fn params(ctx: &MockExecuteContext) -> ItemParameters<'_> {
        ItemParameters::new(ctx, 0)
    }

    #[test]
    fn response_field_extraction() {
        let data = json!({"documents": {"total": 1}, "other": true});
        assert_eq!(ResponseField::Field("documents").extract(data.clone()), json!({"total": 1}));
        assert_eq!(ResponseField::Whole.extract(data.clone()), data);
        assert_eq!(ResponseField::Field("missing").extract(data), Value::Null);
    }

    #[test]
    fn blank_string_is_missing() {
        let ctx = MockExecuteContext::new().with_item(json!({"documentId": "   "}));
        let err = params(&ctx).required_string("documentId", "Document ID").unwrap_err();
        assert_validation_error(&err, "documentId");
        assert_eq!(err.to_string(), "Document ID is required");
    }

    #[test]
    fn optional_id_collapses_to_null() {
        let ctx = MockExecuteContext::new().with_item(json!({"a": "", "b": " ", "c": "f1"}));
        let p = params(&ctx);
        assert_eq!(p.optional_id("a"), Value::Null);
        assert_eq!(p.optional_id("b"), Value::Null);
        assert_eq!(p.optional_id("c"), json!("f1"));
        assert_eq!(p.optional_id("absent"), Value::Null);
    }

    #[test]
    fn json_string_and_object_are_equivalent() {
        let ctx = MockExecuteContext::new()
            .with_item(json!({"v": "{\"email\": \"a@b.c\"}"}))
            .with_item(json!({"v": {"email": "a@b.c"}}));
        let from_string = ItemParameters::new(&ctx, 0).required_json_object("v", "V").unwrap();
        let from_object = ItemParameters::new(&ctx, 1).required_json_object("v", "V").unwrap();
        assert_eq!(from_string, from_object);
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let ctx = MockExecuteContext::new().with_item(json!({"v": "{not json"}));
        let err = params(&ctx).required_json("v", "V").unwrap_err();
        assert!(err.to_string().starts_with("V is not valid JSON"));
    }

    #[test]
    fn optional_object_defaults_to_empty() {
        let ctx = MockExecuteContext::new().with_item(json!({"v": "  "}));
        assert!(params(&ctx).optional_json_object("v", "V").unwrap().is_empty());
        assert!(params(&ctx).optional_json_object("absent", "V").unwrap().is_empty());
    }

    #[test]
    fn empty_array_is_missing() {
        let ctx = MockExecuteContext::new().with_item(json!({"v": "[]", "o": "{}"}));
        let err = params(&ctx).required_json_array("v", "Document Signers").unwrap_err();
        assert_eq!(err.to_string(), "Document Signers is required");
        let err = params(&ctx).required_json_array("o", "Document Signers").unwrap_err();
        assert_eq!(err.to_string(), "Document Signers should be a JSON array");
    }

    #[test]
    fn pagination_bounds() {
        let ok = [(1, 1), (60, 1), (20, 3)];
        for (limit, page) in ok {
            let ctx = MockExecuteContext::new().with_item(json!({"limit": limit, "page": page}));
            assert_eq!(params(&ctx).limit().unwrap(), limit);
            assert_eq!(params(&ctx).page().unwrap(), page);
        }

        let ctx = MockExecuteContext::new().with_item(json!({"limit": 0, "page": 0}));
        assert_eq!(
            params(&ctx).limit().unwrap_err().to_string(),
            "Limit is required and should be greater than 0"
        );
        assert_eq!(
            params(&ctx).page().unwrap_err().to_string(),
            "Page is required and should be greater than 0"
        );

        let ctx = MockExecuteContext::new().with_item(json!({"limit": 61}));
        assert_validation_error(&params(&ctx).limit().unwrap_err(), "limit");
        assert_validation_error(&params(&ctx).page().unwrap_err(), "page");
    }

    #[test]
    fn integral_float_and_numeric_string_accepted() {
        let ctx = MockExecuteContext::new().with_item(json!({"limit": 20.0, "page": "2"}));
        assert_eq!(params(&ctx).limit().unwrap(), 20);
        assert_eq!(params(&ctx).page().unwrap(), 2);

        let ctx = MockExecuteContext::new().with_item(json!({"limit": 2.5}));
        assert_eq!(
            params(&ctx).limit().unwrap_err().to_string(),
            "Limit should be an integer"
        );
    }

    #[test]
    fn integers_beyond_32_bits_are_rejected() {
        let ctx = MockExecuteContext::new().with_item(json!({"page": 2_147_483_647}));
        assert_eq!(params(&ctx).page().unwrap(), 2_147_483_647);

        for page in [
            json!(2_147_483_648_i64),
            json!(1e20),
            json!(u64::MAX),
            json!("99999999999999999999"),
        ] {
            let ctx = MockExecuteContext::new().with_item(json!({"page": page}));
            let err = params(&ctx).page().unwrap_err();
            assert_validation_error(&err, "page");
            assert_eq!(
                err.to_string(),
                "Page should be less than or equal to 2147483647"
            );
        }
    }

    #[test]
    fn option_membership_is_checked() {
        let property = NodeProperty::options("folderType", "Folder Type")
            .with_option(PropertyOption::new("Default", "DEFAULT"));
        let ctx = MockExecuteContext::new()
            .with_item(json!({"folderType": "DEFAULT"}))
            .with_item(json!({"folderType": "SHARED"}));
        assert_eq!(ItemParameters::new(&ctx, 0).required_option(&property).unwrap(), "DEFAULT");
        let err = ItemParameters::new(&ctx, 1).required_option(&property).unwrap_err();
        assert_eq!(err.to_string(), "Folder Type should be one of DEFAULT");
    }
}
