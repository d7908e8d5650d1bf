//! Flow GraphQL - GraphQL-over-HTTP request sending for workflow nodes.
//!
//! This crate provides:
//! - A single-attempt sender that POSTs to one endpoint and unwraps the
//!   `{data}` / `{errors}` envelope.
//! - The GraphQL multipart upload convention (`operations` / `map` / `file`).
//! - Pluggable request authentication.
//! - Error mapping into the node error taxonomy.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

mod auth;
mod client;
mod error;
mod multipart;
mod operation;

pub use auth::{BearerAuth, NoAuth, RequestAuthenticator};
pub use client::{
    GraphqlBody, GraphqlSender, GraphqlSenderBuilder, GraphqlSenderConfig, GraphqlSenderMetrics,
    GraphqlSenderMetricsSnapshot,
};
pub use error::{
    GraphqlClientError, GraphqlError, GraphqlErrorLocation, GraphqlPathSegment, HttpErrorInfo,
};
pub use multipart::{FILE_FIELD, MultipartUpload, UploadFile};
pub use operation::{GraphqlQuery, GraphqlRequest, GraphqlResponse, Variables, decode_envelope};
