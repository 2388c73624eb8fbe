//! Config command - inspect and change configuration.

use anyhow::{Context, Result};
use balance_core::ApiEnvironment;
use balance_store::{SettingsStore, default_config_dir};
use clap::{Args, Subcommand, ValueEnum};

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Choose the Data API environment used by default.
    Environment {
        /// Environment to save.
        #[arg(value_enum)]
        environment: EnvironmentArg,
    },
}

/// Data API environment as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvironmentArg {
    /// Production banks.
    Live,
    /// TrueLayer sandbox.
    Sandbox,
}

impl From<EnvironmentArg> for ApiEnvironment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Live => ApiEnvironment::Live,
            EnvironmentArg::Sandbox => ApiEnvironment::Sandbox,
        }
    }
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, settings: SettingsStore, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(&settings, cli).await,
        ConfigAction::Path => show_paths(&settings, cli),
        ConfigAction::Environment { environment } => {
            set_environment(&settings, (*environment).into(), cli).await
        }
    }
}

async fn set_environment(
    store: &SettingsStore,
    environment: ApiEnvironment,
    cli: &Cli,
) -> Result<()> {
    store.set_environment(environment).await;
    store
        .save()
        .await
        .with_context(|| format!("Failed to save {}", store.path().display()))?;

    match cli.format {
        OutputFormat::Text => println!("Environment: {environment}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "environment": environment });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&value)?);
        }
    }

    Ok(())
}

async fn show_config(store: &SettingsStore, cli: &Cli) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("Balance Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Environment:      {}", settings.environment);
            println!("Log level:        {}", settings.log_level);
            println!(
                "TrueLayer client: {}",
                settings.truelayer_client_id.as_deref().unwrap_or("not configured")
            );
            println!("Linked banks:     {}", settings.credentials.len());
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(store: &SettingsStore, cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = store.path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}
