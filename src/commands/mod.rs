//! Command implementations
//!
//! Each command loads documents, runs one use case and renders the result.
//! Commands return whether the run succeeded; `main` turns that into the
//! exit status.

mod hash;
mod plan;
mod products;
mod project_root;
mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use registry_reconcile::config::{Config, OutputFormat};
use registry_reconcile::domain::ports::{DocumentSource, LoadedDocuments};
use registry_reconcile::presentation::{create_renderer, factory, Renderer};
use registry_reconcile::ReconcileError;

pub use hash::cmd_hash;
pub use plan::cmd_plan;
pub use products::cmd_products;
pub use project_root::discover_project_root;
pub use validate::cmd_validate;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub cwd: PathBuf,
    pub project_root: PathBuf,
    pub config: Config,
    pub renderer: Box<dyn Renderer>,
}

impl CommandContext {
    pub fn new(
        cwd: PathBuf,
        project_root: PathBuf,
        config: Config,
        json: bool,
        ascii: bool,
        verbose: u8,
    ) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            config.output.format
        };
        Self {
            renderer: create_renderer(format, !ascii, verbose),
            cwd,
            project_root,
            config,
        }
    }

    /// Load documents from explicit paths (relative to the working
    /// directory) or from the configured roots (relative to the project)
    pub fn load_documents(&self, explicit: &[PathBuf], configured: &[PathBuf]) -> Result<LoadedDocuments> {
        let explicit: Vec<PathBuf> = explicit.iter().map(|p| self.cwd.join(p)).collect();
        let roots = factory::roots_or(&explicit, configured);
        factory::create_document_source(&self.project_root)
            .load(&roots)
            .map_err(ReconcileError::from)
            .context("failed to load local documents")
    }

    pub fn print(&self, rendered: &str) {
        print!("{rendered}");
    }
}

/// Print per-file errors and report failure; other errors propagate
fn render_batch(ctx: &CommandContext, result: Result<bool, ReconcileError>) -> Result<bool> {
    match result {
        Ok(success) => Ok(success),
        Err(ReconcileError::Batch(errors)) => {
            ctx.print(&ctx.renderer.file_errors(&errors));
            Ok(false)
        }
        Err(other) => Err(other.into()),
    }
}

pub(crate) fn snapshot_path(ctx: &CommandContext, snapshot: Option<&Path>) -> Option<PathBuf> {
    snapshot.map(|p| ctx.cwd.join(p))
}
