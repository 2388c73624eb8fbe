//! Link command - add a bank credential.

use anyhow::{Context, Result};
use balance_core::{Credential, CredentialEntry, ProviderInfo};
use balance_store::SettingsStore;
use clap::Args;
use tracing::info;

use crate::session::Session;
use crate::Cli;

/// Arguments for the link command.
#[derive(Args)]
pub struct LinkArgs {
    /// TrueLayer credentials id.
    #[arg(long)]
    pub credentials_id: String,

    /// TrueLayer provider id (e.g. ob-monzo).
    #[arg(long)]
    pub provider_id: String,

    /// Bank name to display.
    #[arg(long)]
    pub name: String,

    /// Bank logo URL.
    #[arg(long, default_value = "")]
    pub icon_url: String,

    /// Access token. Prefer the environment variable over the flag.
    #[arg(long, env = "BALANCE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,
}

impl LinkArgs {
    fn to_entry(&self) -> CredentialEntry {
        CredentialEntry::new(
            self.access_token.clone(),
            Credential::new(
                self.credentials_id.clone(),
                ProviderInfo::new(
                    self.name.clone(),
                    self.icon_url.clone(),
                    self.provider_id.clone(),
                ),
            ),
        )
    }
}

/// Runs the link command.
pub async fn run(args: &LinkArgs, settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;

    session
        .store
        .add_credentials(args.to_entry())
        .await
        .context("Failed to store access token in the keychain")?;
    session.persist().await?;

    info!(credentials_id = %args.credentials_id, provider = %args.provider_id, "Bank linked");
    if !cli.quiet {
        println!("Linked: {}", args.name);
    }

    Ok(())
}
