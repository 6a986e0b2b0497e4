//! registry-reconcile CLI
//!
//! Usage: registry-reconcile <COMMAND>
//!
//! Commands:
//!   hash      Print the content hash of a data structure file
//!   plan      Classify local data structures against the registry
//!   validate  Validate data products and source applications
//!   products  Plan data product registry writes

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use registry_reconcile::Config;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("failed to read the working directory")?;
    let project_root = commands::discover_project_root(&cwd);
    let (config, warnings) = Config::discover(cli.config.as_deref(), Some(&project_root))
        .context("failed to load configuration")?;

    init_tracing(cli.verbose, &config.output.log_level);
    for warning in &warnings {
        warn!("{warning}");
    }

    let ctx = CommandContext::new(cwd, project_root, config, cli.json, cli.ascii, cli.verbose);
    let success = match &cli.command {
        Commands::Hash { file } => commands::cmd_hash(&ctx, file, cli.json)?,
        Commands::Plan {
            paths,
            snapshot,
            env,
        } => commands::cmd_plan(&ctx, paths, snapshot.as_deref(), env.clone())?,
        Commands::Validate { paths, snapshot } => {
            commands::cmd_validate(&ctx, paths, snapshot.as_deref())?
        }
        Commands::Products { paths, snapshot } => {
            commands::cmd_products(&ctx, paths, snapshot.as_deref())?
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Logs go to stderr; `-v` raises the level above the configured one
fn init_tracing(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
