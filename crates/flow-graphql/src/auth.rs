//! Request authentication.

use flow_core::SecretString;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use crate::error::GraphqlClientError;

/// Decorates an outgoing request with credentials.
///
/// The sender never inspects credentials; it only hands the request builder
/// to an authenticator.
pub trait RequestAuthenticator: Send + Sync {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, GraphqlClientError>;
}

/// `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    token: SecretString,
}

impl BearerAuth {
    #[must_use]
    pub const fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Header value, marked sensitive so it is redacted from debug output.
    pub fn header_value(&self) -> Result<HeaderValue, GraphqlClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose()))
            .map_err(|_| GraphqlClientError::Build {
                message: "API token contains characters not allowed in a header".to_string(),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl RequestAuthenticator for BearerAuth {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, GraphqlClientError> {
        Ok(request.header(AUTHORIZATION, self.header_value()?))
    }
}

/// No authentication.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl RequestAuthenticator for NoAuth {
    fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder, GraphqlClientError> {
        Ok(request)
    }
}
