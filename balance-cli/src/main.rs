// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Balance CLI - bank balances from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Refresh every linked bank and print balances
//! balance
//!
//! # JSON output
//! balance --format json --pretty
//!
//! # Link a bank (token read from BALANCE_ACCESS_TOKEN)
//! balance link --credentials-id abc --provider-id ob-monzo --name Monzo
//!
//! # Configure the TrueLayer app
//! balance truelayer --client-id my-app --client-secret s3cret
//!
//! # Use the sandbox by default
//! balance config environment sandbox
//!
//! # Forget everything
//! balance reset
//! ```

mod commands;
mod output;
mod session;

use anyhow::Result;
use balance_store::{LogLevel, SettingsStore};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, credentials, link, refresh, reset, truelayer};

// ============================================================================
// CLI Definition
// ============================================================================

/// Balance CLI - bank balances via TrueLayer.
#[derive(Parser)]
#[command(name = "balance")]
#[command(about = "Bank account balances from the command line")]
#[command(long_about = r#"
Balance shows the balances of your linked bank accounts.

Banks are linked through TrueLayer. Access tokens and the TrueLayer client
secret are kept in the system keychain; everything else lives in the
settings file (see `balance config path`).

Examples:
  balance                        # Refresh and show balances
  balance --format json          # JSON output
  balance credentials            # List linked banks
  balance reset                  # Forget banks and TrueLayer app
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'refresh' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Use the TrueLayer sandbox instead of the configured environment.
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Refresh balances (default if no command specified).
    #[command(visible_alias = "r")]
    Refresh,

    /// List linked banks.
    #[command(visible_alias = "c")]
    Credentials,

    /// Link a bank.
    Link(link::LinkArgs),

    /// Configure or clear the TrueLayer client.
    Truelayer(truelayer::TrueLayerArgs),

    /// Forget linked banks, balances and the TrueLayer client.
    Reset,

    /// Replace linked banks with the built-in examples and refresh.
    #[cfg(feature = "examples")]
    Examples,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

const LOG_TARGETS: [&str; 4] = ["balance_core", "balance_fetch", "balance_store", "balance_cli"];

fn log_filter(verbose: bool, level: LogLevel) -> EnvFilter {
    let level = if verbose { LogLevel::Debug } else { level };
    let directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect();
    EnvFilter::new(directives.join(","))
}

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose, level))
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = SettingsStore::load_default().await;
    setup_logging(cli.verbose, cli.quiet, settings.log_level().await);

    let result = match &cli.command {
        Some(Commands::Refresh) | None => refresh::run(settings, &cli).await,
        Some(Commands::Credentials) => credentials::run(settings, &cli).await,
        Some(Commands::Link(args)) => link::run(args, settings, &cli).await,
        Some(Commands::Truelayer(args)) => truelayer::run(args, settings, &cli).await,
        Some(Commands::Reset) => reset::run(settings, &cli).await,
        #[cfg(feature = "examples")]
        Some(Commands::Examples) => commands::examples::run(settings, &cli).await,
        Some(Commands::Config(args)) => config::run(args, settings, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
