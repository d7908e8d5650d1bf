//! Flow Core - Host collaborator model for workflow nodes.
//!
//! A node runs inside a workflow host that owns parameter storage, binary
//! storage, credentials, retries and scheduling. This crate provides the
//! types a node needs to talk to that host:
//!
//! - [`ExecuteFunctions`]: per-run access to parameters, binaries and credentials.
//! - [`NodeExecutionData`]: the item-shaped output record.
//! - [`NodeProperty`]: the parameter schema the host renders.
//! - [`NodeError`] / [`NodeOperationError`]: the error taxonomy.
//! - [`HostRequest`] / [`HostResponse`]: the line-delimited wire messages.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

mod context;
mod credential;
mod error;
mod item;
mod node;
mod property;
mod protocol;
mod secret;

pub use context::*;
pub use credential::*;
pub use error::*;
pub use item::*;
pub use node::*;
pub use property::*;
pub use protocol::*;
pub use secret::*;

// Re-export commonly used external types
pub use async_trait::async_trait;
