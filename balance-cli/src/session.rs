//! Wiring between the persisted settings and a live balance store.

use anyhow::{Context, Result};
use balance_core::ApiEnvironment;
use balance_fetch::{SystemKeychain, TrueLayerClient};
use balance_store::{BalanceStore, SettingsStore};
use std::sync::Arc;
use tracing::debug;

use crate::Cli;

/// A balance store hydrated from the settings file.
pub struct Session {
    pub store: BalanceStore,
    pub settings: SettingsStore,
}

impl Session {
    /// Builds the store against the system keychain and TrueLayer.
    pub async fn open(settings: SettingsStore, cli: &Cli) -> Result<Self> {
        let environment = if cli.sandbox {
            ApiEnvironment::Sandbox
        } else {
            settings.environment().await
        };
        debug!(%environment, "Opening session");

        let banking =
            TrueLayerClient::new(environment).context("Failed to create TrueLayer client")?;
        let store = BalanceStore::new(Arc::new(SystemKeychain::new()), Arc::new(banking));
        settings.hydrate(&store).await;

        Ok(Self { store, settings })
    }

    /// Writes the store's credentials and client id back to the settings file.
    pub async fn persist(&self) -> Result<()> {
        self.settings.capture(&self.store).await;
        self.settings
            .save()
            .await
            .with_context(|| format!("Failed to save {}", self.settings.path().display()))
    }
}
