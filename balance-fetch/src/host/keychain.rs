//! Secret storage.
//!
//! Secrets are addressed by a `service` (the application namespace) and an
//! `account` (the key of the individual secret). [`SystemKeychain`] uses the
//! platform store through `keyring`; [`MemoryKeychain`] keeps them in-process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::error::KeychainError;

// ============================================================================
// Keychain API Trait
// ============================================================================

/// API for secure credential storage.
#[async_trait]
pub trait KeychainApi: Send + Sync {
    /// Get a credential from the keychain.
    ///
    /// # Returns
    /// * `Ok(Some(secret))` - Credential found
    /// * `Ok(None)` - Credential not found
    /// * `Err(e)` - Error accessing keychain
    async fn get(&self, service: &str, account: &str) -> Result<Option<String>, KeychainError>;

    /// Set a credential in the keychain, replacing any previous value.
    async fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), KeychainError>;

    /// Delete a credential from the keychain.
    ///
    /// Deleting a credential that does not exist succeeds.
    async fn delete(&self, service: &str, account: &str) -> Result<(), KeychainError>;

    /// Check if a credential exists.
    async fn exists(&self, service: &str, account: &str) -> bool {
        matches!(self.get(service, account).await, Ok(Some(_)))
    }
}

// ============================================================================
// System Keychain Implementation
// ============================================================================

/// Keychain backed by the operating system's secret store.
///
/// `keyring` calls block, so each one runs on tokio's blocking pool.
#[derive(Debug, Clone, Default)]
pub struct SystemKeychain;

impl SystemKeychain {
    /// Creates a new system keychain instance.
    pub fn new() -> Self {
        Self
    }

    /// Runs `op` against the entry for `service`/`account` off the async
    /// runtime.
    async fn with_entry<T, F>(
        op_name: &'static str,
        service: &str,
        account: &str,
        op: F,
    ) -> Result<T, KeychainError>
    where
        T: Send + 'static,
        F: FnOnce(&Entry) -> keyring::Result<T> + Send + 'static,
    {
        let (svc, key) = (service.to_string(), account.to_string());
        let result = tokio::task::spawn_blocking(move || op(&Entry::new(&svc, &key)?))
            .await
            .map_err(|e| KeychainError::Other(format!("keychain task failed: {e}")))?;

        result.map_err(|e| {
            warn!(op = op_name, service, account, error = %e, "Keychain call failed");
            KeychainError::from(e)
        })
    }
}

/// Maps a missing entry to `None`.
fn found<T>(result: keyring::Result<T>) -> keyring::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl KeychainApi for SystemKeychain {
    async fn get(&self, service: &str, account: &str) -> Result<Option<String>, KeychainError> {
        let secret = Self::with_entry("get", service, account, |entry| {
            found(entry.get_password())
        })
        .await?;
        debug!(service, account, found = secret.is_some(), "Keychain read");
        Ok(secret)
    }

    async fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), KeychainError> {
        let secret = secret.to_string();
        Self::with_entry("set", service, account, move |entry| {
            entry.set_password(&secret)
        })
        .await?;
        debug!(service, account, "Keychain write");
        Ok(())
    }

    async fn delete(&self, service: &str, account: &str) -> Result<(), KeychainError> {
        let removed = Self::with_entry("delete", service, account, |entry| {
            found(entry.delete_credential())
        })
        .await?;
        debug!(service, account, existed = removed.is_some(), "Keychain delete");
        Ok(())
    }
}

// ============================================================================
// In-Memory Implementation
// ============================================================================

/// Process-local keychain backed by a map.
///
/// Nothing is written to disk; secrets are lost when the value is dropped.
/// Used where the OS keychain is unavailable or unwanted, such as tests and
/// throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKeychain {
    secrets: Mutex<HashMap<(String, String), String>>,
}

impl MemoryKeychain {
    /// Creates an empty keychain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored secrets.
    pub fn len(&self) -> usize {
        self.secrets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key(service: &str, account: &str) -> (String, String) {
        (service.to_string(), account.to_string())
    }
}

#[async_trait]
impl KeychainApi for MemoryKeychain {
    async fn get(&self, service: &str, account: &str) -> Result<Option<String>, KeychainError> {
        let secrets = self.secrets.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(secrets.get(&Self::key(service, account)).cloned())
    }

    async fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), KeychainError> {
        let mut secrets = self.secrets.lock().unwrap_or_else(PoisonError::into_inner);
        secrets.insert(Self::key(service, account), secret.to_string());
        Ok(())
    }

    async fn delete(&self, service: &str, account: &str) -> Result<(), KeychainError> {
        let mut secrets = self.secrets.lock().unwrap_or_else(PoisonError::into_inner);
        secrets.remove(&Self::key(service, account));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
