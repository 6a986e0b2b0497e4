use std::path::{Path, PathBuf};

use anyhow::Result;

use registry_reconcile::presentation::factory;

use super::{render_batch, snapshot_path, CommandContext};

pub fn cmd_validate(ctx: &CommandContext, paths: &[PathBuf], snapshot: Option<&Path>) -> Result<bool> {
    let loaded = ctx.load_documents(paths, &ctx.config.paths.data_products)?;
    let registry = factory::load_registry(snapshot_path(ctx, snapshot).as_deref())?;
    let options = factory::validate_options(&ctx.config);

    let outcome = factory::create_validate_use_case(&registry)
        .execute(&loaded, &options)
        .map(|result| {
            ctx.print(&ctx.renderer.validation(&result));
            result.is_success()
        });
    render_batch(ctx, outcome)
}
