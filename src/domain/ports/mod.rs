//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod document_source;
pub mod product_registry;
pub mod schema_registry;

pub use document_source::{DocumentSource, LoadedDocuments};
pub use product_registry::{
    CompatCheckable, CompatResult, CompatSource, CompatStatus, EventSpecCompatChecker,
    ProductRegistry,
};
pub use schema_registry::{
    CentralRepository, DeploymentHistory, DestinationLister, Migration, MigrationOracle,
    MigrationVerdict, SchemaListing,
};

/// Failure of an external collaborator
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PortError {
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} returned an unreadable response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: {what} not found")]
    NotFound {
        operation: &'static str,
        what: String,
    },
}

impl PortError {
    pub fn operation(&self) -> &'static str {
        match self {
            PortError::Request { operation, .. }
            | PortError::Decode { operation, .. }
            | PortError::NotFound { operation, .. } => operation,
        }
    }

    /// The failure without the operation name
    pub fn detail(&self) -> String {
        match self {
            PortError::Request { message, .. } => message.clone(),
            PortError::Decode { message, .. } => format!("unreadable response: {message}"),
            PortError::NotFound { what, .. } => format!("{what} not found"),
        }
    }
}
