//! Validation diagnostics
//!
//! Every diagnostic is attributed to the file it came from and, when it
//! concerns a specific node, to a JSON pointer inside that file's body.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::ResourcePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            pointer: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            pointer: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Debug,
            message: message.into(),
            pointer: None,
        }
    }

    pub fn at(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A structural problem with one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub file: ResourcePath,
    pub message: String,
}

impl FileError {
    pub fn new(file: ResourcePath, message: impl Into<String>) -> Self {
        Self {
            file,
            message: message.into(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Diagnostics for a batch of files, keyed by file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticReport {
    files: BTreeMap<ResourcePath, Vec<Diagnostic>>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: &ResourcePath, diagnostic: Diagnostic) {
        self.files.entry(file.clone()).or_default().push(diagnostic);
    }

    pub fn extend(&mut self, file: &ResourcePath, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        let mut diagnostics = diagnostics.into_iter().peekable();
        if diagnostics.peek().is_some() {
            self.files.entry(file.clone()).or_default().extend(diagnostics);
        }
    }

    pub fn merge(&mut self, other: DiagnosticReport) {
        for (file, diagnostics) in other.files {
            self.files.entry(file).or_default().extend(diagnostics);
        }
    }

    pub fn for_file(&self, file: &ResourcePath) -> &[Diagnostic] {
        self.files.get(file).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourcePath, &[Diagnostic])> {
        self.files.iter().map(|(f, d)| (f, d.as_slice()))
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.files
            .values()
            .flatten()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }
}
