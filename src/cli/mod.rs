//! CLI argument parsing and command handlers

mod logging;

pub use logging::init_logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{config_path, ConfigLoader};

/// A document-style terminal UI for inspecting and deleting Kubernetes resources
#[derive(Parser, Debug)]
#[command(name = "kubedoc")]
#[command(about = "A document-style terminal UI for inspecting and deleting Kubernetes resources", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Namespace to scope to (defaults to all namespaces)
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Show pods in phase Succeeded
    #[arg(long)]
    pub show_completed: bool,

    /// Seconds between automatic refreshes
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Disable delete operations
    #[arg(long)]
    pub read_only: bool,

    /// Configuration subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the effective configuration as YAML
    List,
    /// Show configuration file path
    Path,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().unwrap_or_else(|_| ConfigLoader::load_defaults());
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", config_path().display());
        }
    }
    Ok(())
}
