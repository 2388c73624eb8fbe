//! Credential types.
//!
//! A [`Credential`] is what the app remembers about a linked bank connection.
//! It never carries the access token: tokens only live in the secret store,
//! keyed by [`Credential::credentials_id`].

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Provider Info
// ============================================================================

/// Display metadata for the bank behind a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Human-readable bank name (e.g. "Monzo").
    pub display_name: String,
    /// URL of the bank's icon.
    pub icon_url: String,
    /// TrueLayer provider id (e.g. "ob-monzo").
    pub provider_id: String,
}

impl ProviderInfo {
    /// Creates provider info.
    pub fn new(
        display_name: impl Into<String>,
        icon_url: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            icon_url: icon_url.into(),
            provider_id: provider_id.into(),
        }
    }
}

// ============================================================================
// Credential
// ============================================================================

/// A linked bank connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Unique id assigned by TrueLayer when the bank was linked.
    pub credentials_id: String,
    /// The bank behind this connection.
    pub provider: ProviderInfo,
}

impl Credential {
    /// Creates a credential.
    pub fn new(credentials_id: impl Into<String>, provider: ProviderInfo) -> Self {
        Self {
            credentials_id: credentials_id.into(),
            provider,
        }
    }
}

// ============================================================================
// Credential Entry
// ============================================================================

/// A credential together with the access token that must be stored for it.
///
/// This is the input to adding a credential; the token is split off into the
/// secret store and only [`Credential`] is kept in memory.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    /// OAuth access token for the Data API.
    pub access_token: String,
    /// The credential itself.
    pub credentials: Credential,
}

impl CredentialEntry {
    /// Creates an entry.
    pub fn new(access_token: impl Into<String>, credentials: Credential) -> Self {
        Self {
            access_token: access_token.into(),
            credentials,
        }
    }
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("access_token", &"<redacted>")
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_debug_redacts_token() {
        let entry = CredentialEntry::new(
            "super-secret",
            Credential::new("C", ProviderInfo::new("Monzo", "icon", "ob-monzo")),
        );

        let debug = format!("{entry:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("Monzo"));
    }
}
