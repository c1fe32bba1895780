//! Persistence layer for pipeline definition documents

pub mod store;

pub use store::FileDocumentStore;

use crate::core::{DocumentError, PipelineDocument};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Trait for document backends
///
/// Every load returns a fresh copy of the persisted document and every save
/// replaces it in full.
pub trait DocumentStore {
    /// Where the document lives (used for error messages and locking)
    fn location(&self) -> &Path;

    /// Read and parse the whole document
    fn load(&self) -> Result<PipelineDocument, DocumentError>;

    /// Serialize and overwrite the whole document
    fn save(&self, document: &PipelineDocument) -> Result<(), DocumentError>;
}

/// In-memory document store (for testing or ephemeral use)
///
/// Holds the serialized text so loads and saves go through the same
/// encoding as the file store.
pub struct InMemoryDocumentStore {
    location: PathBuf,
    content: RwLock<String>,
}

impl InMemoryDocumentStore {
    /// Create a store seeded with raw document text
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            location: PathBuf::from("memory://pipeline"),
            content: RwLock::new(content.into()),
        }
    }

    /// The currently stored text
    pub fn content(&self) -> String {
        self.content
            .read()
            .map(|c| c.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn load(&self) -> Result<PipelineDocument, DocumentError> {
        PipelineDocument::from_json(&self.content()).map_err(|source| DocumentError::Parse {
            path: self.location.clone(),
            source,
        })
    }

    fn save(&self, document: &PipelineDocument) -> Result<(), DocumentError> {
        let text = document
            .to_pretty_json()
            .map_err(|source| DocumentError::Serialize {
                path: self.location.clone(),
                source,
            })?;
        let mut content = self
            .content
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *content = text;
        Ok(())
    }
}
