//! TrueLayer command - configure the TrueLayer client.

use anyhow::{Context, Result};
use balance_core::TrueLayerConfig;
use balance_store::SettingsStore;
use clap::Args;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::session::Session;
use crate::{Cli, OutputFormat};

/// Arguments for the truelayer command.
///
/// With no arguments the current client is shown. A secret on its own,
/// such as one exported in the environment, changes nothing.
#[derive(Args)]
pub struct TrueLayerArgs {
    /// Client id of the TrueLayer app.
    #[arg(long, requires = "client_secret", conflicts_with = "clear")]
    pub client_id: Option<String>,

    /// Client secret of the TrueLayer app.
    #[arg(long, env = "BALANCE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Remove the client id and its stored secret.
    #[arg(long)]
    pub clear: bool,
}

impl TrueLayerArgs {
    fn to_config(&self) -> Option<TrueLayerConfig> {
        if self.clear {
            return Some(TrueLayerConfig::cleared());
        }
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some(TrueLayerConfig::new(id.clone(), secret.clone())),
            _ => None,
        }
    }
}

/// Runs the truelayer command.
pub async fn run(args: &TrueLayerArgs, settings: SettingsStore, cli: &Cli) -> Result<()> {
    let session = Session::open(settings, cli).await?;

    if let Some(config) = args.to_config() {
        // Saved even if the keychain step failed
        let result = session.store.set_truelayer(config).await;
        session.persist().await?;
        result.context("Failed to update the TrueLayer client secret")?;
        info!(cleared = args.clear, "TrueLayer client updated");
    }

    let client_id = session.store.truelayer_client_id().await;
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_truelayer(client_id.as_deref()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_truelayer(client_id.as_deref())?);
        }
    }

    Ok(())
}
