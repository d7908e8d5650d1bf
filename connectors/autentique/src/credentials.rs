//! `autentiqueApi` credential type.

use flow_core::{CredentialData, CredentialDescription, NodeProperty, NodeResult};
use flow_graphql::{BearerAuth, Variables};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::client::AutentiqueClient;
use crate::operation::{PreparedRequest, ResponseField};
use crate::queries;

/// Outcome of a credential test. Never an error: the host shows it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTestResult {
    /// `OK` or `Error`.
    pub status: String,
    pub message: String,
}

impl CredentialTestResult {
    fn ok() -> Self {
        Self {
            status: "OK".to_string(),
            message: "Connection successful".to_string(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// API token credential, sent as `Authorization: Bearer <apiToken>`.
pub struct AutentiqueApi;

impl AutentiqueApi {
    /// Credential type name.
    pub const NAME: &'static str = "autentiqueApi";

    /// Field holding the token.
    pub const TOKEN_FIELD: &'static str = "apiToken";

    /// Declaration exposed to the host.
    #[must_use]
    pub fn description(api_url: &str) -> CredentialDescription {
        CredentialDescription {
            name: Self::NAME.to_string(),
            display_name: "Autentique API".to_string(),
            properties: vec![
                NodeProperty::string(Self::TOKEN_FIELD, "API Token")
                    .with_description("API Token generated at Autentique's management console")
                    .password()
                    .required(),
            ],
            test_url: Some(api_url.to_string()),
        }
    }

    /// Request decorator for the stored token. A blank token is rejected.
    pub fn authenticator(data: &CredentialData) -> NodeResult<BearerAuth> {
        let token = data.required_field(Self::NAME, Self::TOKEN_FIELD)?;
        Ok(BearerAuth::new(token.clone()))
    }

    /// Send a minimal authenticated query and report the outcome.
    #[instrument(skip_all, fields(endpoint = client.endpoint()))]
    pub async fn test(client: &AutentiqueClient, data: &CredentialData) -> CredentialTestResult {
        let auth = match Self::authenticator(data) {
            Ok(auth) => auth,
            Err(err) => return CredentialTestResult::error(err.to_string()),
        };
        let prepared =
            PreparedRequest::json(queries::CURRENT_USER, Variables::new(), ResponseField::Whole);
        match client.send(prepared, &auth).await {
            Ok(_) => {
                info!("credential test succeeded");
                CredentialTestResult::ok()
            }
            Err(err) => {
                warn!(error = %err, "credential test failed");
                CredentialTestResult::error(err.to_string())
            }
        }
    }
}
