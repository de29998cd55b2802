//! kubedoc - a document-style terminal UI for Kubernetes resources
//!
//! Connects to the current kubeconfig context and maintains a live,
//! navigable document of services and pods with mark-and-delete support.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kubedoc::cli::{handle_config_command, init_logging, Args, Command};
use kubedoc::cluster::{create_client, KubeExecutor};
use kubedoc::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config subcommands never touch the cluster
    if let Some(Command::Config { subcommand }) = args.command {
        return handle_config_command(subcommand);
    }

    let log_file = init_logging(args.debug);
    if let Some(ref log_path) = log_file {
        // Print to stderr before the TUI takes over the terminal
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load configuration, using defaults");
        ConfigLoader::load_defaults()
    });

    // CLI flags override the config file
    if let Some(namespace) = args.namespace {
        config.default_namespace = namespace;
    }
    if args.show_completed {
        config.show_completed = true;
    }
    if args.read_only {
        config.read_only = true;
    }
    if let Some(interval) = args.poll_interval {
        config.poll_interval_secs = interval;
    }

    tracing::debug!(
        namespace = ?config.namespace(),
        show_completed = config.show_completed,
        read_only = config.read_only,
        "configuration loaded"
    );

    tracing::debug!("initializing Kubernetes client");
    let client = create_client().await?;
    let executor = Arc::new(KubeExecutor::new(client, config.namespace()));

    run(executor, &config).await
}

#[cfg(feature = "tui")]
async fn run(executor: Arc<KubeExecutor>, config: &kubedoc::config::Config) -> Result<()> {
    kubedoc::tui::run_tui(executor, config).await
}

#[cfg(not(feature = "tui"))]
async fn run(_executor: Arc<KubeExecutor>, _config: &kubedoc::config::Config) -> Result<()> {
    anyhow::bail!("kubedoc was built without the `tui` feature")
}
