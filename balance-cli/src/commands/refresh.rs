//! Refresh command - fetch and print every linked bank's balances.

use anyhow::Result;
use balance_store::SettingsStore;
use chrono::Utc;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::session::Session;
use crate::{Cli, OutputFormat};

/// Runs the refresh command.
pub async fn run(settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;

    let handle = session.store.refresh_accounts().await;
    info!(credentials = handle.credential_count(), "Waiting for balances");
    handle.wait().await;

    print_accounts(&session, cli).await
}

/// Prints the store's current balances.
pub async fn print_accounts(session: &Session, cli: &Cli) -> Result<()> {
    let accounts = session.store.all_accounts().await;
    let last_refreshed_at = session.store.last_refreshed_at().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!(
                "{}",
                formatter.format_accounts(accounts.as_deref(), last_refreshed_at, Utc::now())
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format_accounts(accounts.as_deref(), last_refreshed_at)?
            );
        }
    }

    Ok(())
}
