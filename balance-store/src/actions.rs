//! Actions that sequence several store mutations.

use balance_core::TrueLayerConfig;
use tracing::{info, warn};

use crate::balance_store::BalanceStore;
use crate::error::StoreError;
#[cfg(any(test, feature = "examples"))]
use crate::refresh::RefreshHandle;

impl BalanceStore {
    /// Forgets credentials, accounts and the TrueLayer client.
    ///
    /// Every step runs even if an earlier one fails. Stored access tokens
    /// are left in the keychain.
    ///
    /// # Errors
    ///
    /// Returns the keychain error if the client secret could not be
    /// deleted. The in-memory state is cleared regardless.
    pub async fn reset_all(&self) -> Result<(), StoreError> {
        info!("Resetting all state");

        self.reset_credentials().await;
        self.reset_accounts().await;

        let result = self.set_truelayer(TrueLayerConfig::cleared()).await;
        if let Err(e) = &result {
            warn!(error = %e, "Failed to delete TrueLayer client secret");
        }
        result
    }

    /// Replaces the credentials with the built-in examples and refreshes.
    ///
    /// # Errors
    ///
    /// Returns an error if an example token cannot be written to the
    /// keychain. No refresh is started in that case.
    #[cfg(any(test, feature = "examples"))]
    pub async fn load_example_credentials(&self) -> Result<RefreshHandle, StoreError> {
        info!("Loading example credentials");

        self.reset_credentials().await;
        for entry in crate::example_credentials::example_credentials() {
            self.add_credentials(entry).await?;
        }

        Ok(self.refresh_accounts().await)
    }
}
