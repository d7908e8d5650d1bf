//! Flow Test Kit - Testing framework and mock infrastructure for workflow nodes.
//!
//! This crate provides:
//!
//! - [`MockGraphqlServer`] - GraphQL endpoint mock returning `{data}` / `{errors}` envelopes
//! - [`MockExecuteContext`] - host context that records parameter reads
//! - Test fixtures for credentials, binaries and API payloads
//! - Assertion helpers for node errors and output records
//! - Tracing configuration for test output
//!
//! # Example
//!
//! ```rust,ignore
//! use flow_testkit::{MockExecuteContext, MockGraphqlServer, fixtures};
//!
//! #[tokio::test]
//! async fn lists_folders() {
//!     flow_testkit::init_test_tracing();
//!
//!     let mock = MockGraphqlServer::start().await;
//!     mock.expect_data(fixtures::json::page("folders", serde_json::json!([]))).await;
//!
//!     let ctx = MockExecuteContext::new()
//!         .with_credentials("autentiqueApi", fixtures::api_token_credentials(fixtures::TEST_API_TOKEN))
//!         .with_item(serde_json::json!({"resource": "folder", "operation": "list"}));
//!     // run the node against `mock.endpoint()` ...
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod assertions;
pub mod fixtures;
mod mock_context;
mod mock_server;
mod tracing_config;

pub use assertions::*;
pub use mock_context::*;
pub use mock_server::*;
pub use tracing_config::*;

// Re-export core types for convenience
pub use flow_core::{ExecuteFunctions, NodeError, NodeExecutionData, NodeResult};
