// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Balance Core
//!
//! Core types and models for the Balance application.
//!
//! This crate provides the foundational types used across all other
//! Balance crates:
//!
//! - Domain models (credentials, accounts, TrueLayer configuration)
//! - Wire types returned by the open-banking Data API
//! - Currency formatting for balance rows
//! - Error types
//!
//! ## Key Types
//!
//! ### Credentials
//! - [`Credential`] - A linked bank connection (no secrets)
//! - [`CredentialEntry`] - A credential plus the access token to store
//! - [`ProviderInfo`] - Display metadata of the bank behind a credential
//!
//! ### Accounts
//! - [`Account`] - A row in the balances list
//! - [`Bank`] - Bank name and logo shown next to a row
//! - [`ProviderAccount`] / [`Balance`] - Data API responses
//!
//! ### Configuration
//! - [`TrueLayerConfig`] - Client id and secret of the TrueLayer app
//! - [`ApiEnvironment`] - Live or sandbox Data API

pub mod currency;
pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Credentials
    Credential,
    CredentialEntry,
    ProviderInfo,
    // Accounts
    Account,
    AccountsResponse,
    Balance,
    Bank,
    ProviderAccount,
    BALANCE_UNAVAILABLE,
    FETCH_FAILED_MESSAGE,
    FETCH_FAILED_NAME,
    // Configuration
    ApiEnvironment,
    TrueLayerConfig,
};

pub use currency::format_currency;
