//! Credentials command - list linked banks.

use anyhow::Result;
use balance_store::SettingsStore;

use crate::output::{JsonFormatter, TextFormatter};
use crate::session::Session;
use crate::{Cli, OutputFormat};

/// Runs the credentials command.
pub async fn run(settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;
    let credentials = session.store.all_credentials().await.unwrap_or_default();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_credentials(&credentials));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&credentials)?);
        }
    }

    Ok(())
}
