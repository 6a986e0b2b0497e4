//! Domain Entities
//!
//! Documents and records the reconciliation operates on.
//! - `DataStructure` - a locally authored schema
//! - `DataProduct` / `SourceApp` - locally authored product documents
//! - `RemoteListingEntry` / `ProductListing` - registry state
//! - `DiagnosticReport` - per-file validation output

mod data_product;
mod data_structure;
mod diagnostics;
mod remote;

pub use data_product::{
    DataProduct, DataProductData, EntitiesDef, EventSpec, Ref, SchemaRef, SourceApp, SourceAppData,
    Trigger,
};
pub use data_structure::{DataStructure, DataStructureData, DataStructureMeta, DataStructureSelf};
pub use diagnostics::{Diagnostic, DiagnosticReport, FileError, Severity};
pub use remote::{
    Deployment, EventSpecReference, ProductListing, RemoteDataProduct, RemoteEntities,
    RemoteEntity, RemoteEventSpec, RemoteListingEntry, RemoteSourceApplication, RemoteTrigger,
};
