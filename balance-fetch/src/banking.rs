//! Banking API abstraction.
//!
//! The refresh logic only needs two calls from an open-banking provider:
//! list the accounts behind an access token, and read one account's
//! balance. [`BankingApi`] captures exactly that so the store can be driven
//! by the real TrueLayer client or by an in-process fake.

use async_trait::async_trait;
use balance_core::{AccountsResponse, Balance};

use crate::error::FetchError;

/// Read access to accounts and balances behind an access token.
#[async_trait]
pub trait BankingApi: Send + Sync {
    /// Lists the accounts the token grants access to.
    async fn get_accounts(&self, access_token: &str) -> Result<AccountsResponse, FetchError>;

    /// Fetches the current balance of one account.
    async fn get_balance(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Balance, FetchError>;
}
