// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Balance Store
//!
//! State management for the Balance application.
//!
//! This crate provides:
//!
//! - **BalanceStore**: Linked credentials, account rows and the TrueLayer
//!   client, with watch channels for UI updates
//! - **Refresh**: Concurrent fetch of every linked bank's balances
//! - **SettingsStore**: Persisted preferences and credential metadata
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use balance_store::{BalanceStore, SettingsStore};
//!
//! let store = BalanceStore::new(keychain, banking);
//! let settings = SettingsStore::load_default().await;
//! settings.hydrate(&store).await;
//!
//! // Subscribe to changes
//! let mut rx = store.subscribe();
//! tokio::spawn(async move {
//!     while rx.changed().await.is_ok() {
//!         println!("Accounts updated!");
//!     }
//! });
//!
//! store.refresh_accounts().await.wait().await;
//! ```

mod actions;
pub mod balance_store;
pub mod error;
#[cfg(any(test, feature = "examples"))]
pub mod example_credentials;
pub mod persistence;
pub mod refresh;
pub mod settings_store;

pub use balance_store::{
    BalanceStore, KEYCHAIN_NAMESPACE, TRUELAYER_SECRET_KEY, credential_token_key,
};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_settings_path, load_json, load_json_or_default, save_json};
pub use refresh::RefreshHandle;
pub use settings_store::{LogLevel, Settings, SettingsStore};

#[cfg(test)]
mod persistence_tests;
#[cfg(test)]
mod test_support;
