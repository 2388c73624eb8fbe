//! Examples command - load the built-in example credentials.

use anyhow::{Context, Result};
use balance_store::SettingsStore;

use crate::commands::refresh::print_accounts;
use crate::session::Session;
use crate::Cli;

/// Runs the examples command.
pub async fn run(settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;

    let handle = session
        .store
        .load_example_credentials()
        .await
        .context("Failed to store example tokens in the keychain")?;
    session.persist().await?;
    handle.wait().await;

    print_accounts(&session, cli).await
}
