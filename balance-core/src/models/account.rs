//! Account rows and Data API response types.
//!
//! [`Account`] is the row shown in the balances list. Rows are rebuilt on
//! every refresh; failures are represented as rows too, so the list always
//! says something about every linked bank.

use serde::{Deserialize, Serialize};

use super::credential::ProviderInfo;

/// Row name used when a bank's account list could not be fetched.
pub const FETCH_FAILED_NAME: &str = "Unable to fetch accounts";

/// Row text used when a bank's account list could not be fetched.
pub const FETCH_FAILED_MESSAGE: &str = "We have not been able to fetch accounts for this bank at this time. Either try again, or reconnect.";

/// Balance text used when a single account's balance could not be fetched.
pub const BALANCE_UNAVAILABLE: &str = "Unable to get balance";

// ============================================================================
// Bank
// ============================================================================

/// Bank name and logo shown next to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    /// Bank display name.
    pub name: String,
    /// Bank logo URL.
    pub logo: String,
}

impl From<&ProviderInfo> for Bank {
    fn from(provider: &ProviderInfo) -> Self {
        Self {
            name: provider.display_name.clone(),
            logo: provider.icon_url.clone(),
        }
    }
}

// ============================================================================
// Account
// ============================================================================

/// A row in the balances list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The bank holding this account.
    pub bank: Bank,
    /// Account display name.
    pub name: String,
    /// Formatted balance, or a human-readable failure message.
    pub balance: String,
    /// Set when the whole bank could not be fetched.
    #[serde(default)]
    pub has_error: bool,
}

impl Account {
    /// Creates a row with a formatted balance.
    pub fn new(bank: Bank, name: impl Into<String>, balance: impl Into<String>) -> Self {
        Self {
            bank,
            name: name.into(),
            balance: balance.into(),
            has_error: false,
        }
    }

    /// Placeholder row for a bank whose account list could not be fetched.
    pub fn fetch_failed(provider: &ProviderInfo) -> Self {
        Self {
            bank: Bank::from(provider),
            name: FETCH_FAILED_NAME.to_string(),
            balance: FETCH_FAILED_MESSAGE.to_string(),
            has_error: true,
        }
    }

    /// Row for an account whose balance could not be fetched.
    ///
    /// Unlike [`Account::fetch_failed`] this row is not flagged as an error.
    pub fn balance_unavailable(bank: Bank, name: impl Into<String>) -> Self {
        Self::new(bank, name, BALANCE_UNAVAILABLE)
    }
}

// ============================================================================
// Data API Responses
// ============================================================================

/// An account as returned by the Data API accounts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAccount {
    /// Account id used to fetch the balance.
    pub account_id: String,
    /// Display name of the account.
    pub display_name: String,
    /// Account currency, if reported.
    #[serde(default)]
    pub currency: Option<String>,
    /// Account type (e.g. "TRANSACTION", "SAVINGS").
    #[serde(default)]
    pub account_type: Option<String>,
}

/// Response of the Data API accounts endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountsResponse {
    /// Accounts held under the credential.
    #[serde(default)]
    pub results: Vec<ProviderAccount>,
}

/// Balance of a single account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// ISO 4217 currency code.
    pub currency: String,
    /// Available balance.
    pub available: f64,
    /// Current (booked) balance.
    #[serde(default)]
    pub current: Option<f64>,
    /// Overdraft limit.
    #[serde(default)]
    pub overdraft: Option<f64>,
    /// When the bank last updated this balance.
    #[serde(default)]
    pub update_timestamp: Option<String>,
}

impl Balance {
    /// Creates a balance with only the required fields.
    pub fn new(available: f64, currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            available,
            current: None,
            overdraft: None,
            update_timestamp: None,
        }
    }

    /// Formats the available balance as currency text.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency code is invalid.
    pub fn format_available(&self) -> Result<String, crate::CoreError> {
        crate::currency::format_currency(self.available, &self.currency)
    }
}
