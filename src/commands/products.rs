use std::path::{Path, PathBuf};

use anyhow::Result;

use registry_reconcile::presentation::factory;

use super::{render_batch, snapshot_path, CommandContext};

pub fn cmd_products(ctx: &CommandContext, paths: &[PathBuf], snapshot: Option<&Path>) -> Result<bool> {
    let loaded = ctx.load_documents(paths, &ctx.config.paths.data_products)?;
    let registry = factory::load_registry(snapshot_path(ctx, snapshot).as_deref())?;

    let outcome = factory::create_products_use_case(&registry)
        .execute(&loaded)
        .map(|changes| {
            ctx.print(&ctx.renderer.products(&changes));
            true
        });
    render_batch(ctx, outcome)
}
