//! Assertion helpers for node errors and output records.

use flow_core::{NodeError, NodeExecutionData, NodeOperationError};

// ─────────────────────────────────────────────────────────────────────────────
// Error Assertions
// ─────────────────────────────────────────────────────────────────────────────

/// Assert that an error is a validation error for `parameter`.
///
/// # Panics
///
/// Panics if the error is of another kind or names another parameter.
pub fn assert_validation_error(error: &NodeError, parameter: &str) {
    match error {
        NodeError::Validation { parameter: p, .. } => assert_eq!(
            p, parameter,
            "Expected validation error for '{parameter}' but got one for '{p}'"
        ),
        other => panic!("Expected validation error for '{parameter}' but got: {other:?}"),
    }
}

/// Assert that an error rejects an unknown resource.
///
/// # Panics
///
/// Panics if the error is of another kind or names another resource.
pub fn assert_unsupported_resource(error: &NodeError, resource: &str) {
    match error {
        NodeError::UnsupportedSelection {
            resource: r,
            operation: None,
        } => assert_eq!(r, resource),
        other => panic!("Expected unsupported resource '{resource}' but got: {other:?}"),
    }
}

/// Assert that an error is an API error whose message contains `fragment`.
///
/// # Panics
///
/// Panics if the error is of another kind or the message doesn't match.
pub fn assert_api_error_contains(error: &NodeError, fragment: &str) {
    match error {
        NodeError::Api { message, .. } => assert!(
            message.contains(fragment),
            "Expected API error containing '{fragment}' but got: {message}"
        ),
        other => panic!("Expected API error containing '{fragment}' but got: {other:?}"),
    }
}

/// Assert that an error is a transport error.
///
/// # Panics
///
/// Panics if the error is of another kind.
pub fn assert_transport_error(error: &NodeError) {
    assert!(
        matches!(error, NodeError::Transport { .. }),
        "Expected transport error but got: {error:?}"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Record Assertions
// ─────────────────────────────────────────────────────────────────────────────

/// Assert that a record is a success paired with `item_index`.
///
/// # Panics
///
/// Panics if the record carries an error or another index.
pub fn assert_success_record(record: &NodeExecutionData, item_index: usize) {
    assert!(
        record.error.is_none(),
        "Expected success record but got error: {:?}",
        record.error
    );
    assert_eq!(record.paired_item, item_index);
}

/// Assert that a record is a degraded error record for `item_index` and
/// return its error.
///
/// # Panics
///
/// Panics if the record is a success or has another index.
pub fn assert_error_record(record: &NodeExecutionData, item_index: usize) -> &NodeOperationError {
    assert_eq!(record.paired_item, item_index);
    assert_eq!(record.json, serde_json::json!({}));
    match &record.error {
        Some(error) => {
            assert_eq!(error.item_index, item_index);
            error
        }
        None => panic!("Expected error record but got: {:?}", record.json),
    }
}
