use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use registry_reconcile::domain::entities::DataStructure;
use registry_reconcile::infrastructure::decode_document;
use registry_reconcile::config::OutputFormat;

use super::CommandContext;

/// Print the content hash of one data structure document
pub fn cmd_hash(ctx: &CommandContext, file: &Path, json: bool) -> Result<bool> {
    let path = ctx.cwd.join(file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = decode_document(&path, &content)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let structure: DataStructure = serde_json::from_value(document)
        .with_context(|| format!("{} is not a data structure", path.display()))?;

    let hash = structure.content_hash();
    if json || ctx.config.output.format == OutputFormat::Json {
        ctx.print(&format!(
            "{}\n",
            json!({"file": file.display().to_string(), "hash": hash.as_str()})
        ));
    } else {
        ctx.print(&format!("{}\n", hash));
    }
    Ok(true)
}
