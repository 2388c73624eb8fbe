//! Domain models for Balance.
//!
//! ## Submodules
//!
//! - [`credential`] - Linked bank credentials (Credential, CredentialEntry, ProviderInfo)
//! - [`account`] - Balance rows and Data API responses (Account, Bank, Balance)
//! - [`config`] - TrueLayer configuration (TrueLayerConfig, ApiEnvironment)

mod account;
mod config;
mod credential;

// Re-export everything at the models level
pub use account::{
    Account, AccountsResponse, BALANCE_UNAVAILABLE, Balance, Bank, FETCH_FAILED_MESSAGE,
    FETCH_FAILED_NAME, ProviderAccount,
};
pub use config::{ApiEnvironment, TrueLayerConfig};
pub use credential::{Credential, CredentialEntry, ProviderInfo};
