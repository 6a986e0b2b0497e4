//! Local document source
//!
//! Implements the DocumentSource port over a directory tree. Walks each
//! root with `ignore` (hidden files and `.gitignore`d paths are skipped)
//! and decodes every YAML or JSON file into an untyped tree. Files that
//! fail to read or decode are reported, not fatal.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::FileError;
use crate::domain::ports::{DocumentSource, LoadedDocuments, PortError};
use crate::domain::value_objects::ResourcePath;

pub const DOCUMENT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Documents under a project directory, keyed by path relative to it
#[derive(Debug, Clone)]
pub struct LocalDocumentSource {
    base: PathBuf,
}

impl LocalDocumentSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn key_for(&self, path: &Path) -> ResourcePath {
        ResourcePath::from_path(path.strip_prefix(&self.base).unwrap_or(path))
    }

    fn load_file(&self, path: &Path, loaded: &mut LoadedDocuments) {
        let key = self.key_for(path);
        let decoded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| decode_document(path, &content));

        match decoded {
            Ok(value) => {
                loaded.documents.insert(key, value);
            }
            Err(message) => {
                warn!(file = %key, "could not decode document");
                loaded.errors.push(FileError::new(key, message));
            }
        }
    }
}

impl DocumentSource for LocalDocumentSource {
    fn load(&self, roots: &[PathBuf]) -> Result<LoadedDocuments, PortError> {
        let mut loaded = LoadedDocuments {
            documents: BTreeMap::new(),
            errors: Vec::new(),
        };

        for root in roots {
            let root = if root.is_absolute() {
                root.clone()
            } else {
                self.base.join(root)
            };
            if !root.exists() {
                return Err(PortError::NotFound {
                    operation: "load documents",
                    what: root.display().to_string(),
                });
            }

            if root.is_file() {
                self.load_file(&root, &mut loaded);
                continue;
            }

            let walker = WalkBuilder::new(&root)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();
            for entry in walker {
                let entry = entry.map_err(|e| PortError::Request {
                    operation: "load documents",
                    message: e.to_string(),
                })?;
                let path = entry.path();
                if entry.file_type().is_some_and(|t| t.is_file()) && has_document_extension(path) {
                    self.load_file(path, &mut loaded);
                }
            }
        }

        debug!(
            documents = loaded.documents.len(),
            errors = loaded.errors.len(),
            "loaded local documents"
        );
        Ok(loaded)
    }
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Decode by extension: `.json` as JSON, anything else as YAML
pub fn decode_document(path: &Path, content: &str) -> Result<Value, String> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))
    } else {
        serde_yaml_ng::from_str(content).map_err(|e| format!("invalid YAML: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn load_reads_yaml_and_json_relative_to_base() {
        let dir = tempdir().unwrap();
        write(dir.path(), "schemas/user.yml", "apiVersion: v1\nresourceType: data-structure\n");
        write(dir.path(), "schemas/nested/order.json", r#"{"apiVersion": "v1"}"#);
        write(dir.path(), "schemas/README.md", "# not a document");

        let source = LocalDocumentSource::new(dir.path());
        let loaded = source.load(&[PathBuf::from("schemas")]).unwrap();

        let keys: Vec<&str> = loaded.documents.keys().map(ResourcePath::as_str).collect();
        assert_eq!(keys, vec!["schemas/nested/order.json", "schemas/user.yml"]);
        assert_eq!(
            loaded.documents[&ResourcePath::new("schemas/user.yml")]["resourceType"],
            "data-structure"
        );
        assert!(loaded.errors.is_empty());
    }

    #[test]
    fn undecodable_files_are_collected() {
        let dir = tempdir().unwrap();
        write(dir.path(), "dp/ok.yaml", "a: 1\n");
        write(dir.path(), "dp/broken.yaml", "a: [1, 2\n");
        write(dir.path(), "dp/broken.json", "{");

        let loaded = LocalDocumentSource::new(dir.path())
            .load(&[PathBuf::from("dp")])
            .unwrap();

        assert_eq!(loaded.documents.len(), 1);
        let files: Vec<&str> = loaded.errors.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, vec!["dp/broken.json", "dp/broken.yaml"]);
        assert!(loaded.errors[0].message.starts_with("invalid JSON"));
        assert!(loaded.errors[1].message.starts_with("invalid YAML"));
    }

    #[test]
    fn hidden_and_ignored_paths_are_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "dp/.draft.yml", "a: 1\n");
        write(dir.path(), "dp/tmp/scratch.yml", "a: 1\n");
        write(dir.path(), "dp/.gitignore", "tmp/\n");
        write(dir.path(), "dp/real.yml", "a: 1\n");

        let loaded = LocalDocumentSource::new(dir.path())
            .load(&[PathBuf::from("dp")])
            .unwrap();

        let keys: Vec<&str> = loaded.documents.keys().map(ResourcePath::as_str).collect();
        assert_eq!(keys, vec!["dp/real.yml"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempdir().unwrap();
        let err = LocalDocumentSource::new(dir.path())
            .load(&[PathBuf::from("nope")])
            .unwrap_err();
        assert_eq!(err.operation(), "load documents");
    }

    #[test]
    fn single_file_root() {
        let dir = tempdir().unwrap();
        write(dir.path(), "one.json", r#"{"x": true}"#);

        let loaded = LocalDocumentSource::new(dir.path())
            .load(&[PathBuf::from("one.json")])
            .unwrap();
        assert_eq!(loaded.documents.len(), 1);
    }
}
