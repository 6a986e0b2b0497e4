//! File system implementations

mod local;

pub use local::{decode_document, LocalDocumentSource, DOCUMENT_EXTENSIONS};
