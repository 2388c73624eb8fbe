// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Balance Fetch
//!
//! Secret storage and open-banking API access for the Balance application.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for system interactions:
//!
//! - [`host::keychain`] - Secure credential storage (system keychain)
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//!
//! ## Banking API
//!
//! - [`banking::BankingApi`] - Accounts and balances behind an access token
//! - [`truelayer::TrueLayerClient`] - TrueLayer Data API implementation
//!
//! ## Example
//!
//! ```ignore
//! use balance_core::ApiEnvironment;
//! use balance_fetch::{BankingApi, TrueLayerClient};
//!
//! let client = TrueLayerClient::new(ApiEnvironment::Sandbox)?;
//! let accounts = client.get_accounts(&token).await?;
//! for account in accounts.results {
//!     let balance = client.get_balance(&token, &account.account_id).await?;
//!     println!("{}: {}", account.display_name, balance.format_available()?);
//! }
//! ```

pub mod banking;
pub mod error;
pub mod host;
pub mod truelayer;

// Errors
pub use error::{FetchError, HttpError, KeychainError};

// Host APIs
pub use host::{
    http::HttpClient,
    keychain::{KeychainApi, MemoryKeychain, SystemKeychain},
};

// Banking API
pub use banking::BankingApi;
pub use truelayer::TrueLayerClient;
