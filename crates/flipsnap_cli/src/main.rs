//! Flipsnap CLI
//!
//! - `flipsnap replay <scenario>`: run a gesture scenario headlessly and
//!   print (or write) the JSON report
//! - `flipsnap config [<file>]`: print the effective widget config as TOML

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flipsnap::SnapConfig;
use flipsnap_cli::{run_loaded_scenario, Scenario};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flipsnap")]
#[command(about = "Replay snap-scrolling gestures against a headless container")]
#[command(version)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSON or TOML scenario
    Replay {
        /// Scenario file
        scenario: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Widget config (TOML) overriding the scenario's own
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective widget config
    Config {
        /// Config file (TOML); defaults are printed when omitted
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay {
            scenario,
            report,
            config,
        } => cmd_replay(scenario, report, config),
        Commands::Config { path } => cmd_config(path),
    }
}

fn cmd_replay(
    scenario_path: PathBuf,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let scenario = Scenario::from_path(&scenario_path)?;
    let config = config_path
        .as_deref()
        .map(SnapConfig::from_path)
        .transpose()?;

    let report = run_loaded_scenario(&scenario, config.as_ref())?;

    match &report_path {
        Some(path) => {
            report.write_to_path(path)?;
            info!("Report written to {}", path.display());
        }
        None => report.write_to_writer(&mut std::io::stdout().lock())?,
    }

    if report.is_failed() {
        bail!(
            "{} failed at step {}: {}",
            report.assertion.as_deref().unwrap_or("scenario"),
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}

fn cmd_config(path: Option<PathBuf>) -> Result<()> {
    let config = match path {
        Some(path) => SnapConfig::from_path(&path)?,
        None => SnapConfig::default(),
    };
    print!("{}", config.to_toml()?);
    Ok(())
}
