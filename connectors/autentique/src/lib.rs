//! Autentique document-signing node.
//!
//! Exposes the `document` and `folder` resources of Autentique's GraphQL API
//! as node operations. Each input item selects a resource and an operation;
//! the [`AutentiqueNode`] dispatcher validates the item's parameters, sends
//! one request (JSON, or multipart for file uploads) and emits one output
//! record per item.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod connector;
pub mod credentials;
pub mod description;
pub mod dispatcher;
pub mod operation;
pub mod queries;
pub mod registry;
pub mod resource;
pub mod resources;

pub use client::AutentiqueClient;
pub use config::AutentiqueConfig;
pub use connector::AutentiqueConnector;
pub use credentials::{AutentiqueApi, CredentialTestResult};
pub use description::node_description;
pub use dispatcher::AutentiqueNode;
pub use operation::{ItemParameters, Operation, PreparedRequest, ResponseField};
pub use registry::{Registry, registry};
pub use resource::Resource;
