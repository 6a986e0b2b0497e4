use std::path::PathBuf;

use clap::{Parser, Subcommand};

use registry_reconcile::Environment;

/// registry-reconcile - plan registry changes from local schema files
#[derive(Parser, Debug)]
#[command(name = "registry-reconcile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to .reconcile/config.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// ASCII output instead of unicode icons
    #[arg(long, global = true)]
    pub ascii: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the content hash of a data structure file
    Hash {
        /// YAML or JSON data structure document
        file: PathBuf,
    },

    /// Classify local data structures against the registry
    Plan {
        /// Files or directories (defaults to [paths] data_structures)
        paths: Vec<PathBuf>,

        /// Registry snapshot (YAML or JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Target environment (dev or prod)
        #[arg(short, long)]
        env: Option<Environment>,
    },

    /// Validate data products and source applications
    Validate {
        /// Files or directories (defaults to [paths] data_products)
        paths: Vec<PathBuf>,

        /// Registry snapshot (YAML or JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Plan data product, event specification and source application writes
    Products {
        /// Files or directories (defaults to [paths] data_products)
        paths: Vec<PathBuf>,

        /// Registry snapshot (YAML or JSON)
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },
}
