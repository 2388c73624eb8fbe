//! Built-in credentials for local development.
//!
//! The tokens are placeholders; edit them locally to point at a sandbox
//! account.

use balance_core::{Credential, CredentialEntry, ProviderInfo};

/// The example credentials, in the order they are added.
pub fn example_credentials() -> Vec<CredentialEntry> {
    vec![
        CredentialEntry::new(
            "access token here",
            Credential::new(
                "credentials id here",
                ProviderInfo::new(
                    "Monzo",
                    "https://truelayer-provider-assets.s3.amazonaws.com/global/icons/monzo.svg",
                    "ob-monzo",
                ),
            ),
        ),
        CredentialEntry::new(
            "invalid access token",
            Credential::new(
                "123",
                ProviderInfo::new(
                    "Barclaycard",
                    "https://truelayer-provider-assets.s3.amazonaws.com/global/icons/barclaycard.svg",
                    "ob-barclaycard",
                ),
            ),
        ),
    ]
}
