//! Account refresh.
//!
//! A refresh clears the account rows and fans out one task per linked
//! credential. Each task fetches the credential's accounts and then all of
//! their balances concurrently, appending a row as each one lands. Failures
//! never escape a refresh; they become placeholder rows instead.

use balance_core::{Account, Bank, Credential, ProviderAccount};
use balance_fetch::FetchError;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::balance_store::{BalanceStore, KEYCHAIN_NAMESPACE, credential_token_key};

// ============================================================================
// Refresh Handle
// ============================================================================

/// Tracks the tasks of a started refresh.
///
/// Dropping the handle leaves the tasks running; [`RefreshHandle::wait`]
/// waits for every row to land.
#[derive(Debug)]
pub struct RefreshHandle {
    tasks: Vec<JoinHandle<()>>,
    started_at: Option<DateTime<Utc>>,
}

impl RefreshHandle {
    /// Handle for a refresh that had nothing to fetch.
    pub(crate) fn idle() -> Self {
        Self {
            tasks: Vec::new(),
            started_at: None,
        }
    }

    /// When the refresh was started, or `None` if there were no credentials.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Whether the refresh had nothing to fetch.
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of credentials being refreshed.
    pub fn credential_count(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for every credential task to finish.
    pub async fn wait(self) {
        for result in join_all(self.tasks).await {
            if let Err(e) = result {
                warn!(error = %e, "Refresh task did not complete");
            }
        }
    }
}

// ============================================================================
// Refresh
// ============================================================================

impl BalanceStore {
    /// Refreshes every linked bank.
    ///
    /// Clears the account rows, then starts one task per credential and
    /// records the start time without waiting for them. With no credentials
    /// the rows stay cleared and the timestamp is left alone.
    ///
    /// Starting a refresh, or resetting the accounts, while an earlier
    /// refresh is still in flight discards the earlier refresh's late rows.
    pub async fn refresh_accounts(&self) -> RefreshHandle {
        let generation = self.clear_accounts().await;

        let credentials = self.all_credentials().await.unwrap_or_default();
        if credentials.is_empty() {
            debug!("No credentials to refresh");
            return RefreshHandle::idle();
        }

        info!(credentials = credentials.len(), generation, "Refreshing accounts");

        let tasks = credentials
            .into_iter()
            .map(|credential| {
                let store = self.clone();
                tokio::spawn(async move {
                    store.refresh_credential(generation, credential).await;
                })
            })
            .collect();

        let started_at = Utc::now();
        self.set_last_refreshed_at(started_at).await;

        RefreshHandle {
            tasks,
            started_at: Some(started_at),
        }
    }

    /// Fetches one credential's accounts and balances.
    async fn refresh_credential(&self, generation: u64, credential: Credential) {
        let credentials_id = credential.credentials_id.as_str();

        let fetched = match self.access_token(&credential).await {
            Ok(token) => self
                .banking
                .get_accounts(&token)
                .await
                .map(|response| (token, response.results)),
            Err(e) => Err(e),
        };

        let (token, accounts) = match fetched {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(
                    credentials_id,
                    provider = %credential.provider.provider_id,
                    error = %e,
                    "Failed to fetch accounts"
                );
                self.add_account_for(generation, Account::fetch_failed(&credential.provider))
                    .await;
                return;
            }
        };

        debug!(credentials_id, accounts = accounts.len(), "Fetching balances");

        let bank = Bank::from(&credential.provider);
        join_all(
            accounts
                .into_iter()
                .map(|account| self.refresh_balance(generation, &bank, &token, account)),
        )
        .await;
    }

    /// Fetches and formats one account's balance.
    async fn refresh_balance(
        &self,
        generation: u64,
        bank: &Bank,
        token: &str,
        account: ProviderAccount,
    ) {
        let formatted = self
            .banking
            .get_balance(token, &account.account_id)
            .await
            .and_then(|balance| balance.format_available().map_err(FetchError::from));

        let row = match formatted {
            Ok(text) => Account::new(bank.clone(), account.display_name, text),
            Err(e) => {
                warn!(account_id = %account.account_id, error = %e, "Failed to fetch balance");
                Account::balance_unavailable(bank.clone(), account.display_name)
            }
        };

        self.add_account_for(generation, row).await;
    }

    /// Reads a credential's access token from the keychain.
    async fn access_token(&self, credential: &Credential) -> Result<String, FetchError> {
        self.keychain
            .get(
                KEYCHAIN_NAMESPACE,
                &credential_token_key(&credential.credentials_id),
            )
            .await?
            .ok_or_else(|| FetchError::MissingToken(credential.credentials_id.clone()))
    }
}

// ============================================================================
// Tests
// ============================================================================
