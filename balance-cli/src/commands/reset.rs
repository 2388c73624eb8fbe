//! Reset command - forget everything.

use anyhow::{Context, Result};
use balance_store::SettingsStore;
use tracing::info;

use crate::session::Session;
use crate::Cli;

/// Runs the reset command.
pub async fn run(settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;

    let result = session.store.reset_all().await;
    session.persist().await?;
    result.context("State was reset but the TrueLayer client secret could not be deleted")?;

    info!("All state reset");
    if !cli.quiet {
        println!("Linked banks and TrueLayer client removed");
    }

    Ok(())
}
