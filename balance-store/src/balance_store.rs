//! Main balance state store.
//!
//! Holds linked credentials, the latest account rows and the TrueLayer client
//! id, with change notifications for UI updates. Every mutation touches a
//! single logical field and bumps the change version exactly once.

use balance_core::{Account, Credential, CredentialEntry, TrueLayerConfig};
use balance_fetch::{BankingApi, KeychainApi};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::debug;

use crate::error::StoreError;

/// Keychain service all Balance secrets are stored under.
pub const KEYCHAIN_NAMESPACE: &str = "balance-menubar";

/// Keychain key of the TrueLayer client secret.
pub const TRUELAYER_SECRET_KEY: &str = "truelayer-client-secret";

/// Keychain key of a credential's access token.
pub fn credential_token_key(credentials_id: &str) -> String {
    format!("credentials_{credentials_id}")
}

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the balance store.
#[derive(Debug, Default)]
pub(crate) struct BalanceStoreInner {
    /// Account rows; `None` until the first refresh or after a reset.
    pub(crate) accounts: Option<Vec<Account>>,
    /// Linked credentials; `None` until the first one is added.
    pub(crate) credentials: Option<Vec<Credential>>,
    /// When the last refresh was started.
    pub(crate) last_refreshed_at: Option<DateTime<Utc>>,
    /// TrueLayer client id. The secret is only kept in the keychain.
    pub(crate) truelayer_client_id: Option<String>,
    /// Bumped on every accounts reset. Rows produced by a refresh that
    /// started before the latest reset are discarded.
    pub(crate) accounts_generation: u64,
}

// ============================================================================
// Balance Store
// ============================================================================

/// Application state for Balance.
///
/// Cheap to clone; clones share the same state, keychain and banking client.
/// Observable via [`BalanceStore::subscribe`].
#[derive(Clone)]
pub struct BalanceStore {
    pub(crate) inner: Arc<RwLock<BalanceStoreInner>>,
    notify: Arc<watch::Sender<u64>>,
    version: Arc<RwLock<u64>>,
    pub(crate) keychain: Arc<dyn KeychainApi>,
    pub(crate) banking: Arc<dyn BankingApi>,
}

impl fmt::Debug for BalanceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalanceStore").finish_non_exhaustive()
    }
}

impl BalanceStore {
    /// Creates an empty store backed by the given keychain and banking client.
    pub fn new(keychain: Arc<dyn KeychainApi>, banking: Arc<dyn BankingApi>) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(BalanceStoreInner::default())),
            notify: Arc::new(notify),
            version: Arc::new(RwLock::new(0)),
            keychain,
            banking,
        }
    }

    /// Applies a change to the state and notifies subscribers.
    pub(crate) async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BalanceStoreInner) -> R,
    {
        let result = {
            let mut inner = self.inner.write().await;
            f(&mut inner)
        };
        self.notify_change().await;
        result
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Clears all account rows.
    ///
    /// Rows still in flight from an earlier refresh are discarded when they
    /// land.
    pub async fn reset_accounts(&self) {
        self.clear_accounts().await;
    }

    /// Clears the accounts and returns the new accounts generation.
    pub(crate) async fn clear_accounts(&self) -> u64 {
        let generation = self
            .update(|inner| {
                inner.accounts = None;
                inner.accounts_generation += 1;
                inner.accounts_generation
            })
            .await;
        debug!(generation, "Accounts reset");
        generation
    }

    /// Forgets all linked credentials.
    ///
    /// Stored access tokens are left in the keychain.
    pub async fn reset_credentials(&self) {
        self.update(|inner| inner.credentials = None).await;
        debug!("Credentials reset");
    }

    /// Appends an account row.
    pub async fn add_account(&self, account: Account) {
        debug!(bank = %account.bank.name, account = %account.name, "Adding account");
        self.update(|inner| inner.accounts.get_or_insert_with(Vec::new).push(account))
            .await;
    }

    /// Appends an account row if no accounts reset happened since
    /// `generation` was issued. Returns whether the row was kept.
    pub(crate) async fn add_account_for(&self, generation: u64, account: Account) -> bool {
        let kept = {
            let mut inner = self.inner.write().await;
            if inner.accounts_generation == generation {
                inner.accounts.get_or_insert_with(Vec::new).push(account);
                true
            } else {
                false
            }
        };

        if kept {
            self.notify_change().await;
        } else {
            debug!(generation, "Dropping row from superseded refresh");
        }
        kept
    }

    /// Links a credential.
    ///
    /// The access token is written to the keychain first; the credential is
    /// only added to memory once the token is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be written to the keychain. The
    /// credential list is unchanged in that case.
    pub async fn add_credentials(&self, entry: CredentialEntry) -> Result<(), StoreError> {
        let CredentialEntry {
            access_token,
            credentials,
        } = entry;

        self.keychain
            .set(
                KEYCHAIN_NAMESPACE,
                &credential_token_key(&credentials.credentials_id),
                &access_token,
            )
            .await?;

        debug!(credentials_id = %credentials.credentials_id, provider = %credentials.provider.provider_id, "Credential added");
        self.update(|inner| {
            inner
                .credentials
                .get_or_insert_with(Vec::new)
                .push(credentials);
        })
        .await;
        Ok(())
    }

    /// Re-seeds credentials loaded from disk at startup.
    ///
    /// Does not touch the keychain: the tokens are expected to be there from
    /// when the credentials were first added.
    pub async fn restore_credentials(&self, credentials: Vec<Credential>) {
        debug!(count = credentials.len(), "Restoring credentials");
        self.update(|inner| {
            inner.credentials = if credentials.is_empty() {
                None
            } else {
                Some(credentials)
            };
        })
        .await;
    }

    /// Records when a refresh was started.
    pub async fn set_last_refreshed_at(&self, timestamp: DateTime<Utc>) {
        self.update(|inner| inner.last_refreshed_at = Some(timestamp))
            .await;
    }

    /// Configures the TrueLayer client.
    ///
    /// A config with a secret stores it in the keychain and then records the
    /// client id. A config without one records the client id (typically
    /// `None`) and then removes any stored secret, so clearing always takes
    /// effect in memory even if the keychain refuses the delete.
    ///
    /// # Errors
    ///
    /// Returns an error if the keychain write or delete fails.
    pub async fn set_truelayer(&self, config: TrueLayerConfig) -> Result<(), StoreError> {
        let has_secret = config.has_secret();
        let TrueLayerConfig {
            client_id,
            client_secret,
        } = config;

        match client_secret.filter(|_| has_secret) {
            Some(secret) => {
                self.keychain
                    .set(KEYCHAIN_NAMESPACE, TRUELAYER_SECRET_KEY, &secret)
                    .await?;
                self.update(|inner| inner.truelayer_client_id = client_id)
                    .await;
                debug!("TrueLayer client configured");
            }
            None => {
                self.update(|inner| inner.truelayer_client_id = client_id)
                    .await;
                self.keychain
                    .delete(KEYCHAIN_NAMESPACE, TRUELAYER_SECRET_KEY)
                    .await?;
                debug!("TrueLayer client secret cleared");
            }
        }
        Ok(())
    }

    /// Re-seeds the TrueLayer client id loaded from disk at startup.
    pub async fn restore_truelayer_client(&self, client_id: Option<String>) {
        self.update(|inner| inner.truelayer_client_id = client_id)
            .await;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All account rows, or `None` if never refreshed.
    pub async fn all_accounts(&self) -> Option<Vec<Account>> {
        self.inner.read().await.accounts.clone()
    }

    /// All linked credentials, or `None` if none were added.
    pub async fn all_credentials(&self) -> Option<Vec<Credential>> {
        self.inner.read().await.credentials.clone()
    }

    /// When the last refresh was started.
    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_refreshed_at
    }

    /// Whether a TrueLayer client id is configured.
    pub async fn has_truelayer_client(&self) -> bool {
        self.inner.read().await.truelayer_client_id.is_some()
    }

    /// The configured TrueLayer client id.
    pub async fn truelayer_client_id(&self) -> Option<String> {
        self.inner.read().await.truelayer_client_id.clone()
    }

    // ========================================================================
    // Observable
    // ========================================================================

    /// Subscribes to store changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FlakyKeychain, ScriptedBank, monzo};
    use balance_fetch::MemoryKeychain;

    fn store_with(keychain: Arc<dyn KeychainApi>) -> BalanceStore {
        BalanceStore::new(keychain, Arc::new(ScriptedBank::new()))
    }

    fn row(name: &str) -> Account {
        Account::new(
            balance_core::Bank {
                name: "Monzo".to_string(),
                logo: String::new(),
            },
            name,
            "£1.00",
        )
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = store_with(Arc::new(MemoryKeychain::new()));

        assert!(store.all_accounts().await.is_none());
        assert!(store.all_credentials().await.is_none());
        assert!(store.last_refreshed_at().await.is_none());
        assert!(!store.has_truelayer_client().await);
        assert!(store.truelayer_client_id().await.is_none());
    }

    #[tokio::test]
    async fn test_reset_accounts_clears_rows() {
        let store = store_with(Arc::new(MemoryKeychain::new()));
        store.add_account(row("Current")).await;

        store.reset_accounts().await;
        assert!(store.all_accounts().await.is_none());

        // Resetting twice is fine
        store.reset_accounts().await;
        assert!(store.all_accounts().await.is_none());
    }

    #[tokio::test]
    async fn test_add_account_appends_in_order() {
        let store = store_with(Arc::new(MemoryKeychain::new()));

        store.add_account(row("First")).await;
        assert_eq!(store.all_accounts().await.unwrap(), vec![row("First")]);

        store.add_account(row("Second")).await;
        store.add_account(row("Third")).await;

        let names: Vec<String> = store
            .all_accounts()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn test_add_credentials_stores_token() {
        let keychain = Arc::new(MemoryKeychain::new());
        let store = store_with(keychain.clone());

        store
            .add_credentials(CredentialEntry::new("T", monzo("C")))
            .await
            .unwrap();

        let credentials = store.all_credentials().await.unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].credentials_id, "C");
        assert_eq!(
            keychain.get(KEYCHAIN_NAMESPACE, "credentials_C").await.unwrap(),
            Some("T".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_credentials_keychain_failure_leaves_state_untouched() {
        let keychain = Arc::new(FlakyKeychain::new());
        keychain.fail_writes(true);
        let store = store_with(keychain.clone());

        let result = store
            .add_credentials(CredentialEntry::new("T", monzo("C")))
            .await;

        assert!(matches!(result, Err(StoreError::Keychain(_))));
        assert!(store.all_credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_reset_credentials_keeps_tokens() {
        let keychain = Arc::new(MemoryKeychain::new());
        let store = store_with(keychain.clone());
        store
            .add_credentials(CredentialEntry::new("T", monzo("C")))
            .await
            .unwrap();

        store.reset_credentials().await;

        assert!(store.all_credentials().await.is_none());
        assert!(keychain.exists(KEYCHAIN_NAMESPACE, "credentials_C").await);
    }

    #[tokio::test]
    async fn test_set_truelayer_with_secret() {
        let keychain = Arc::new(MemoryKeychain::new());
        let store = store_with(keychain.clone());

        store
            .set_truelayer(TrueLayerConfig::new("client-id", "client-secret"))
            .await
            .unwrap();

        assert!(store.has_truelayer_client().await);
        assert_eq!(store.truelayer_client_id().await.as_deref(), Some("client-id"));
        assert_eq!(
            keychain
                .get(KEYCHAIN_NAMESPACE, TRUELAYER_SECRET_KEY)
                .await
                .unwrap()
                .as_deref(),
            Some("client-secret")
        );
    }

    #[tokio::test]
    async fn test_set_truelayer_without_secret_deletes_it() {
        let keychain = Arc::new(MemoryKeychain::new());
        let store = store_with(keychain.clone());
        store
            .set_truelayer(TrueLayerConfig::new("client-id", "client-secret"))
            .await
            .unwrap();

        store.set_truelayer(TrueLayerConfig::cleared()).await.unwrap();

        assert!(!store.has_truelayer_client().await);
        assert!(!keychain.exists(KEYCHAIN_NAMESPACE, TRUELAYER_SECRET_KEY).await);
    }

    #[tokio::test]
    async fn test_set_truelayer_secret_write_failure_keeps_old_id() {
        let keychain = Arc::new(FlakyKeychain::new());
        let store = store_with(keychain.clone());
        store.restore_truelayer_client(Some("old".to_string())).await;

        keychain.fail_writes(true);
        let result = store
            .set_truelayer(TrueLayerConfig::new("new", "secret"))
            .await;

        assert!(result.is_err());
        assert_eq!(store.truelayer_client_id().await.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_clear_truelayer_applies_even_if_delete_fails() {
        let keychain = Arc::new(FlakyKeychain::new());
        let store = store_with(keychain.clone());
        store.restore_truelayer_client(Some("client-id".to_string())).await;

        keychain.fail_deletes(true);
        let result = store.set_truelayer(TrueLayerConfig::cleared()).await;

        assert!(result.is_err());
        assert!(!store.has_truelayer_client().await);
    }

    #[tokio::test]
    async fn test_restore_credentials() {
        let keychain = Arc::new(MemoryKeychain::new());
        let store = store_with(keychain.clone());

        store.restore_credentials(vec![monzo("A"), monzo("B")]).await;
        assert_eq!(store.all_credentials().await.unwrap().len(), 2);
        assert!(keychain.is_empty());

        store.restore_credentials(Vec::new()).await;
        assert!(store.all_credentials().await.is_none());
    }

    #[tokio::test]
    async fn test_stale_generation_is_dropped() {
        let store = store_with(Arc::new(MemoryKeychain::new()));

        let generation = store.clear_accounts().await;
        assert!(store.add_account_for(generation, row("Kept")).await);

        store.reset_accounts().await;
        assert!(!store.add_account_for(generation, row("Stale")).await);
        assert!(store.all_accounts().await.is_none());
    }

    #[tokio::test]
    async fn test_subscribe_notifies_on_change() {
        let store = store_with(Arc::new(MemoryKeychain::new()));
        let mut rx = store.subscribe();
        let initial = *rx.borrow();

        store.add_account(row("Current")).await;

        rx.changed().await.unwrap();
        assert!(*rx.borrow() > initial);
    }

    #[test]
    fn test_credential_token_key() {
        assert_eq!(credential_token_key("C"), "credentials_C");
        assert_eq!(credential_token_key("123"), "credentials_123");
    }
}
