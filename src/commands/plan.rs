use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use registry_reconcile::presentation::factory;
use registry_reconcile::Environment;

use super::{render_batch, snapshot_path, CommandContext};

/// Schema publish plan; fails when any destination needs a bigger bump
pub fn cmd_plan(
    ctx: &CommandContext,
    paths: &[PathBuf],
    snapshot: Option<&Path>,
    env: Option<Environment>,
) -> Result<bool> {
    let loaded = ctx.load_documents(paths, &ctx.config.paths.data_structures)?;
    let registry = factory::load_registry(snapshot_path(ctx, snapshot).as_deref())?;

    let mut options = factory::plan_options(&ctx.config);
    if let Some(env) = env {
        options.target_env = env;
    }

    let outcome = factory::create_plan_use_case(&registry)
        .execute(&loaded, &options)
        .map(|result| {
            ctx.print(&ctx.renderer.plan(&result));
            info!(changes = result.changes.total(), "plan complete");
            !result.has_migration_reports()
        });
    render_batch(ctx, outcome)
}
