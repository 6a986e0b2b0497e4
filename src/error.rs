//! Error types for registry-reconcile
//!
//! Library errors use `thiserror`; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::FileError;
use crate::domain::ports::PortError;
use crate::domain::services::{
    ClassifyError, DeployCheckError, MigrationError, PromotionError, UnresolvedReferences,
};

/// Result type alias for reconcile operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Main error type for reconcile operations
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// Structural problems in one or more local files, reported together
    #[error("{} file error(s):\n{}", .0.len(), render_batch(.0))]
    Batch(Vec<FileError>),

    /// A registry or oracle call failed; the run cannot continue
    #[error("{operation} failed: {message}")]
    Port {
        operation: &'static str,
        message: String,
    },

    #[error(transparent)]
    Classify(#[from] ClassifyError),

    #[error(transparent)]
    Promotion(#[from] PromotionError),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    DeployCheck(#[from] DeployCheckError),

    #[error(transparent)]
    Unresolved(#[from] UnresolvedReferences),

    /// Snapshot or document could not be decoded
    #[error("invalid document {file}: {message}")]
    InvalidDocument { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Path does not exist
    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },
}

impl From<PortError> for ReconcileError {
    fn from(err: PortError) -> Self {
        Self::Port {
            operation: err.operation(),
            message: err.detail(),
        }
    }
}

impl From<Vec<FileError>> for ReconcileError {
    fn from(errors: Vec<FileError>) -> Self {
        Self::Batch(errors)
    }
}

fn render_batch(errors: &[FileError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
