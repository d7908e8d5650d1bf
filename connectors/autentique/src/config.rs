//! Node configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Autentique GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.autentique.com.br/v2/graphql";

/// Configuration for the Autentique node.
///
/// There are no retry settings: each call is a single attempt and retries
/// belong to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutentiqueConfig {
    /// GraphQL endpoint.
    ///
    /// Default: `https://api.autentique.com.br/v2/graphql`
    pub api_url: String,

    /// Request timeout.
    ///
    /// Default: 30s
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// `User-Agent` header.
    ///
    /// Default: `flow-autentique/<version>`
    pub user_agent: String,
}

impl Default for AutentiqueConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("flow-autentique/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AutentiqueConfig {
    /// Point the node at another endpoint.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

/// Serde helper for `Duration` as seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
