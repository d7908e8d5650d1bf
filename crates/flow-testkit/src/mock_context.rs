//! Mock host context that records what a node asks for.

use std::sync::{Mutex, PoisonError};

use flow_core::{
    BinaryData, CredentialData, ExecuteFunctions, ItemInput, NodeResult, StaticExecuteContext,
};

/// One `node_parameter` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRead {
    pub name: String,
    pub item_index: usize,
}

/// An [`ExecuteFunctions`] implementation for tests.
///
/// Behaves like [`StaticExecuteContext`] and additionally records every
/// parameter read, so tests can assert on lookup order.
#[derive(Debug, Default)]
pub struct MockExecuteContext {
    inner: StaticExecuteContext,
    reads: Mutex<Vec<ParameterRead>>,
}

impl MockExecuteContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing static context.
    #[must_use]
    pub fn from_static(inner: StaticExecuteContext) -> Self {
        Self {
            inner,
            reads: Mutex::new(Vec::new()),
        }
    }

    /// Add an item whose parameters are the fields of `parameters`.
    ///
    /// Non-object values add an item without parameters.
    #[must_use]
    pub fn with_item(mut self, parameters: serde_json::Value) -> Self {
        self.inner.items.push(ItemInput {
            parameters: match parameters {
                serde_json::Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
            ..ItemInput::default()
        });
        self
    }

    /// Attach a binary to the most recently added item.
    ///
    /// Adds an empty item first if there is none.
    #[must_use]
    pub fn with_binary(mut self, property: impl Into<String>, binary: BinaryData) -> Self {
        if self.inner.items.is_empty() {
            self.inner.items.push(ItemInput::default());
        }
        if let Some(item) = self.inner.items.last_mut() {
            item.binary.insert(property.into(), binary);
        }
        self
    }

    /// Set a node-level parameter shared by every item.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.inner.parameters.insert(name.into(), value);
        self
    }

    /// Register credentials for a credential type.
    #[must_use]
    pub fn with_credentials(mut self, name: impl Into<String>, data: CredentialData) -> Self {
        self.inner.credentials.insert(name.into(), data);
        self
    }

    /// Set the continue-on-fail flag.
    #[must_use]
    pub const fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.inner.continue_on_fail = continue_on_fail;
        self
    }

    /// Every parameter read so far, in call order.
    #[must_use]
    pub fn parameter_reads(&self) -> Vec<ParameterRead> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true if `name` was read for any item.
    #[must_use]
    pub fn was_read(&self, name: &str) -> bool {
        self.parameter_reads().iter().any(|read| read.name == name)
    }

    /// Forget recorded reads.
    pub fn clear_reads(&self) {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ExecuteFunctions for MockExecuteContext {
    fn input_len(&self) -> usize {
        self.inner.input_len()
    }

    fn node_parameter(&self, name: &str, item_index: usize) -> Option<serde_json::Value> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ParameterRead {
                name: name.to_string(),
                item_index,
            });
        tracing::trace!(name, item_index, "parameter read");
        self.inner.node_parameter(name, item_index)
    }

    fn binary_data(&self, item_index: usize, property: &str) -> NodeResult<BinaryData> {
        self.inner.binary_data(item_index, property)
    }

    fn credentials(&self, name: &str) -> NodeResult<CredentialData> {
        self.inner.credentials(name)
    }

    fn continue_on_fail(&self) -> bool {
        self.inner.continue_on_fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_reads_in_order() {
        let ctx = MockExecuteContext::new()
            .with_parameter("resource", json!("folder"))
            .with_item(json!({"operation": "list"}));

        assert_eq!(ctx.node_parameter("resource", 0), Some(json!("folder")));
        assert_eq!(ctx.node_parameter("operation", 0), Some(json!("list")));
        assert!(ctx.node_parameter("limit", 0).is_none());

        let names: Vec<_> = ctx.parameter_reads().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["resource", "operation", "limit"]);
        assert!(ctx.was_read("limit"));
        ctx.clear_reads();
        assert!(!ctx.was_read("limit"));
    }

    #[test]
    fn binary_attaches_to_last_item() {
        let ctx = MockExecuteContext::new()
            .with_item(json!({}))
            .with_item(json!({}))
            .with_binary("data", BinaryData::from_bytes(b"x", None, None));
        assert!(ctx.binary_data(0, "data").is_err());
        assert!(ctx.binary_data(1, "data").is_ok());
    }
}
