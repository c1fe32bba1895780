//! File-backed document store

use crate::core::{DocumentError, PipelineDocument};
use crate::persistence::DocumentStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and writes the pipeline definition file
///
/// Writes truncate and rewrite the file in place, without a temp-file rename.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> DocumentError {
        DocumentError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<PipelineDocument, DocumentError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let document = PipelineDocument::from_json(&content).map_err(|source| DocumentError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            path = %self.path.display(),
            steps = document.steps.len(),
            "Loaded pipeline definition"
        );
        Ok(document)
    }

    fn save(&self, document: &PipelineDocument) -> Result<(), DocumentError> {
        let content = document
            .to_pretty_json()
            .map_err(|source| DocumentError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "Wrote pipeline definition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDocumentStore::new(dir.path().join("missing.orchest"));
        assert!(matches!(store.load(), Err(DocumentError::Io { .. })));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.orchest");
        fs::write(&path, "{\"parameters\": ").unwrap();

        let store = FileDocumentStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert!(err.to_string().contains("pipeline.orchest"));
    }

    #[test]
    fn test_save_writes_sorted_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.orchest");
        fs::write(&path, r#"{"steps": {}, "parameters": {"z": 1, "a": 2}}"#).unwrap();

        let store = FileDocumentStore::new(&path);
        let doc = store.load().unwrap();
        store.save(&doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "{\n    \"parameters\": {\n        \"a\": 2,\n        \"z\": 1\n    },\n    \"steps\": {}\n}"
        );
        let reparsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, json!({"steps": {}, "parameters": {"z": 1, "a": 2}}));
    }
}
