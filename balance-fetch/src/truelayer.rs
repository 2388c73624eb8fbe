//! TrueLayer Data API client.

use async_trait::async_trait;
use balance_core::{AccountsResponse, ApiEnvironment, Balance};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::banking::BankingApi;
use crate::error::FetchError;
use crate::host::http::{HttpClient, ResponseExt};

// ============================================================================
// Constants
// ============================================================================

/// Accounts endpoint.
const ACCOUNTS_ENDPOINT: &str = "/data/v1/accounts";

// ============================================================================
// API Response Types
// ============================================================================

/// Response from the balance endpoint. TrueLayer wraps the single balance
/// in a `results` array.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    results: Vec<Balance>,
}

// ============================================================================
// API Client
// ============================================================================

/// TrueLayer Data API client.
#[derive(Debug, Clone)]
pub struct TrueLayerClient {
    http: HttpClient,
    api_base: String,
}

impl TrueLayerClient {
    /// Creates a client for the given environment.
    ///
    /// Requests are restricted to the environment's TrueLayer domains.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(environment: ApiEnvironment) -> Result<Self, FetchError> {
        let http = HttpClient::new()?
            .with_allowed_domains(environment.allowed_domains().iter().copied());

        Ok(Self {
            http,
            api_base: environment.api_base().to_string(),
        })
    }

    /// Creates a client against a custom base URL with no domain restriction.
    pub fn with_http(http: HttpClient, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn accounts_url(&self) -> String {
        format!("{}{}", self.api_base, ACCOUNTS_ENDPOINT)
    }

    fn balance_url(&self, account_id: &str) -> String {
        format!("{}{}/{}/balance", self.api_base, ACCOUNTS_ENDPOINT, account_id)
    }

    /// Maps non-success statuses to errors.
    fn check_status(response: &Response) -> Result<(), FetchError> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthenticationFailed(format!(
                "Access token rejected (HTTP {status})"
            )));
        }

        if response.is_rate_limited() {
            return Err(FetchError::RateLimited {
                retry_after: response.retry_after_secs(),
            });
        }

        Err(FetchError::InvalidResponse(format!("HTTP {status}")))
    }
}

#[async_trait]
impl BankingApi for TrueLayerClient {
    #[instrument(skip(self, access_token))]
    async fn get_accounts(&self, access_token: &str) -> Result<AccountsResponse, FetchError> {
        debug!("Fetching TrueLayer accounts");

        let response = self
            .http
            .get_with_bearer(&self.accounts_url(), access_token)
            .await?;
        Self::check_status(&response)?;

        let body = response.text().await?;
        let accounts: AccountsResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse accounts response");
            FetchError::InvalidResponse(format!("JSON error: {e}"))
        })?;

        debug!(count = accounts.results.len(), "Accounts received");
        Ok(accounts)
    }

    #[instrument(skip(self, access_token))]
    async fn get_balance(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Balance, FetchError> {
        debug!("Fetching TrueLayer balance");

        let response = self
            .http
            .get_with_bearer(&self.balance_url(account_id), access_token)
            .await?;
        Self::check_status(&response)?;

        let body = response.text().await?;
        parse_balance(&body, account_id)
    }
}

/// Extracts the first balance from a balance response body.
fn parse_balance(body: &str, account_id: &str) -> Result<Balance, FetchError> {
    let parsed: BalanceResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse balance response");
        FetchError::InvalidResponse(format!("JSON error: {e}"))
    })?;

    parsed.results.into_iter().next().ok_or_else(|| {
        FetchError::InvalidResponse(format!("No balance returned for account {account_id}"))
    })
}

// ============================================================================
// Tests
// ============================================================================
