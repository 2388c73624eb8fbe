//! In-process fakes for store tests.

use async_trait::async_trait;
use balance_core::{AccountsResponse, Balance, Credential, ProviderAccount, ProviderInfo};
use balance_fetch::{BankingApi, FetchError, KeychainApi, KeychainError, MemoryKeychain};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;

pub(crate) fn monzo(credentials_id: &str) -> Credential {
    Credential::new(
        credentials_id,
        ProviderInfo::new(
            "Monzo",
            "https://truelayer-provider-assets.s3.amazonaws.com/global/icons/monzo.svg",
            "ob-monzo",
        ),
    )
}

pub(crate) fn provider_account(account_id: &str, display_name: &str) -> ProviderAccount {
    ProviderAccount {
        account_id: account_id.to_string(),
        display_name: display_name.to_string(),
        currency: Some("GBP".to_string()),
        account_type: Some("TRANSACTION".to_string()),
    }
}

// ============================================================================
// Scripted Bank
// ============================================================================

/// Banking API that answers from fixed tables.
///
/// Tokens without an accounts entry and account ids without a balance entry
/// fail. With a gate, every accounts call waits for a permit first.
#[derive(Default)]
pub(crate) struct ScriptedBank {
    accounts: HashMap<String, Vec<ProviderAccount>>,
    balances: HashMap<String, Balance>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedBank {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_accounts(mut self, token: &str, accounts: Vec<ProviderAccount>) -> Self {
        self.accounts.insert(token.to_string(), accounts);
        self
    }

    pub(crate) fn with_balance(mut self, account_id: &str, balance: Balance) -> Self {
        self.balances.insert(account_id.to_string(), balance);
        self
    }

    pub(crate) fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl BankingApi for ScriptedBank {
    async fn get_accounts(&self, access_token: &str) -> Result<AccountsResponse, FetchError> {
        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.unwrap();
        }

        self.accounts
            .get(access_token)
            .map(|results| AccountsResponse {
                results: results.clone(),
            })
            .ok_or_else(|| FetchError::AuthenticationFailed("unknown token".to_string()))
    }

    async fn get_balance(
        &self,
        _access_token: &str,
        account_id: &str,
    ) -> Result<Balance, FetchError> {
        self.balances
            .get(account_id)
            .cloned()
            .ok_or_else(|| FetchError::InvalidResponse(format!("no balance for {account_id}")))
    }
}

// ============================================================================
// Flaky Keychain
// ============================================================================

/// Memory keychain whose writes and deletes can be switched to fail.
#[derive(Default)]
pub(crate) struct FlakyKeychain {
    inner: MemoryKeychain,
    fail_writes: AtomicBool,
    fail_deletes: AtomicBool,
}

impl FlakyKeychain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeychainApi for FlakyKeychain {
    async fn get(&self, service: &str, account: &str) -> Result<Option<String>, KeychainError> {
        self.inner.get(service, account).await
    }

    async fn set(&self, service: &str, account: &str, secret: &str) -> Result<(), KeychainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KeychainError::AccessDenied);
        }
        self.inner.set(service, account, secret).await
    }

    async fn delete(&self, service: &str, account: &str) -> Result<(), KeychainError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(KeychainError::Unavailable("locked".to_string()));
        }
        self.inner.delete(service, account).await
    }
}
