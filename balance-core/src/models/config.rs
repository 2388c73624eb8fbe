//! TrueLayer configuration types.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// TrueLayer Config
// ============================================================================

/// Client credentials of the TrueLayer application.
///
/// Only `client_id` is ever kept in memory state. A present `client_secret`
/// is written to the secret store; an absent one clears it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueLayerConfig {
    /// OAuth client id.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl TrueLayerConfig {
    /// Creates a config with both id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
        }
    }

    /// An empty config, used to clear the stored client.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Returns true if the config carries a non-empty secret.
    pub fn has_secret(&self) -> bool {
        self.client_secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl fmt::Debug for TrueLayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueLayerConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

// ============================================================================
// API Environment
// ============================================================================

/// Which TrueLayer Data API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    /// Production API.
    #[default]
    Live,
    /// Sandbox API with mock banks.
    Sandbox,
}

impl ApiEnvironment {
    /// Base URL of the Data API for this environment.
    pub fn api_base(&self) -> &'static str {
        match self {
            Self::Live => "https://api.truelayer.com",
            Self::Sandbox => "https://api.truelayer-sandbox.com",
        }
    }

    /// Domains requests may be sent to in this environment.
    pub fn allowed_domains(&self) -> &'static [&'static str] {
        match self {
            Self::Live => &["truelayer.com"],
            Self::Sandbox => &["truelayer-sandbox.com"],
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Sandbox => write!(f, "sandbox"),
        }
    }
}
