//! Output Rendering
//!
//! Renders plans, validation reports and product change sets as text or
//! JSON. Renderers return strings; the command decides where they go.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::json;

use crate::application::{PlanResult, ValidateResult};
use crate::config::OutputFormat;
use crate::domain::entities::{FileError, Severity};
use crate::domain::services::{ChangeContext, ProductChangeSet};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    create: &'static str,
    update: &'static str,
    delete: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "⚠",
            create: "+",
            update: "~",
            delete: "-",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[WARN]",
            create: "+",
            update: "~",
            delete: "-",
            arrow: "->",
        }
    }
}

/// Renders command results for stdout
pub trait Renderer {
    fn plan(&self, result: &PlanResult) -> String;
    fn validation(&self, result: &ValidateResult) -> String;
    fn products(&self, changes: &ProductChangeSet) -> String;
    fn file_errors(&self, errors: &[FileError]) -> String;
}

/// Text renderer
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level; above zero, debug diagnostics are shown
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }
}

fn describe(change: &ChangeContext) -> String {
    format!("{} {}", change.identity.key(), change.identity.version)
}

impl Renderer for TextRenderer {
    fn plan(&self, result: &PlanResult) -> String {
        let icons = self.icons();
        let changes = &result.changes;
        let mut out = String::new();

        if changes.is_empty() {
            let _ = writeln!(out, "{} No changes for {}", icons.check, result.target_env);
            return out;
        }

        let _ = writeln!(
            out,
            "Plan for {}: {} change(s)",
            result.target_env,
            changes.total()
        );

        let sections = [
            ("Create", &changes.to_create, icons.create),
            ("Update metadata", &changes.to_update_meta, icons.update),
            ("New version", &changes.to_update_new_version, icons.update),
            ("Patch", &changes.to_update_patch, icons.update),
        ];
        for (title, bucket, icon) in sections {
            if bucket.is_empty() {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "  {} ({}):", title, bucket.len());
            for change in bucket.iter() {
                let label = match change.remote_version.as_deref() {
                    Some(remote) if !remote.is_empty() && remote != change.identity.version => {
                        format!(
                            "{} {} {} {}",
                            change.identity.key(),
                            remote,
                            icons.arrow,
                            change.identity.version
                        )
                    }
                    _ => describe(change),
                };
                let _ = writeln!(out, "    {} {}  ({})", icon, label, change.source_file);
            }
        }

        if result.has_migration_reports() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} Version bump too small ({} file(s)):",
                icons.warn,
                result.migrations.len()
            );
            for (file, reports) in &result.migrations {
                let _ = writeln!(out, "  {}", file);
                for (destination, report) in reports {
                    let _ = writeln!(
                        out,
                        "    {}: suggested version {}",
                        destination, report.suggested_version
                    );
                    for message in &report.messages {
                        let _ = writeln!(out, "      - {}", message);
                    }
                }
            }
        }
        out
    }

    fn validation(&self, result: &ValidateResult) -> String {
        let icons = self.icons();
        let mut out = String::new();

        for (file, diagnostics) in result.diagnostics.iter() {
            let shown: Vec<_> = diagnostics
                .iter()
                .filter(|d| self.verbose > 0 || d.severity >= Severity::Warning)
                .collect();
            if shown.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{}", file);
            for d in shown {
                let icon = match d.severity {
                    Severity::Error => icons.cross,
                    Severity::Warning => icons.warn,
                    Severity::Info | Severity::Debug => "·",
                };
                let _ = match &d.pointer {
                    Some(pointer) => writeln!(out, "  {} {} (at {})", icon, d.message, pointer),
                    None => writeln!(out, "  {} {}", icon, d.message),
                };
            }
        }

        let errors = result.diagnostics.error_count();
        let warnings = result.diagnostics.count(Severity::Warning);
        let status = if result.is_success() {
            icons.check
        } else {
            icons.cross
        };
        let _ = writeln!(
            out,
            "{} {} data product(s), {} source application(s): {} error(s), {} warning(s)",
            status, result.data_products, result.source_apps, errors, warnings
        );
        out
    }

    fn products(&self, changes: &ProductChangeSet) -> String {
        let icons = self.icons();
        let mut out = String::new();

        if changes.is_empty() {
            let _ = writeln!(out, "{} Data products are up to date", icons.check);
            return out;
        }
        let _ = writeln!(out, "Data product changes: {}", changes.total());

        let origin = |id: &str| changes.attribution.get(id).cloned().unwrap_or_default();
        let mut rows: Vec<(&str, &str, &str, &str)> = Vec::new();
        rows.extend(changes.sa_create.iter().map(|r| ("Source applications", icons.create, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.sa_update.iter().map(|r| ("Source applications", icons.update, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.dp_create.iter().map(|r| ("Data products", icons.create, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.dp_update.iter().map(|r| ("Data products", icons.update, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.es_create.iter().map(|r| ("Event specifications", icons.create, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.es_update.iter().map(|r| ("Event specifications", icons.update, r.name.as_str(), r.id.as_str())));
        rows.extend(changes.es_delete.iter().map(|r| ("Event specifications", icons.delete, r.name.as_str(), r.id.as_str())));

        let mut current = "";
        for (section, icon, name, id) in rows {
            if section != current {
                let _ = writeln!(out);
                let _ = writeln!(out, "  {}:", section);
                current = section;
            }
            let _ = writeln!(out, "    {} {} ({})  {}", icon, name, id, origin(id));
        }
        out
    }

    fn file_errors(&self, errors: &[FileError]) -> String {
        let icons = self.icons();
        let mut out = String::new();
        for error in errors {
            let _ = writeln!(out, "{} {}: {}", icons.cross, error.file, error.message);
        }
        out
    }
}

/// JSON renderer; one pretty-printed document per command
pub struct JsonRenderer;

fn pretty<T: Serialize>(value: &T) -> String {
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

impl Renderer for JsonRenderer {
    fn plan(&self, result: &PlanResult) -> String {
        pretty(&json!({
            "success": !result.has_migration_reports(),
            "plan": result,
        }))
    }

    fn validation(&self, result: &ValidateResult) -> String {
        pretty(&json!({
            "success": result.is_success(),
            "dataProducts": result.data_products,
            "sourceApplications": result.source_apps,
            "errors": result.diagnostics.error_count(),
            "warnings": result.diagnostics.count(Severity::Warning),
            "diagnostics": result.diagnostics,
        }))
    }

    fn products(&self, changes: &ProductChangeSet) -> String {
        pretty(&json!({
            "success": true,
            "changes": changes,
        }))
    }

    fn file_errors(&self, errors: &[FileError]) -> String {
        pretty(&json!({
            "success": false,
            "errors": errors,
        }))
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
