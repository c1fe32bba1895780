//! Test utility functions for pipeline-params

#![allow(dead_code)]

use pipeline_params::core::{FixedStepResolver, Params};
use pipeline_params::{FileDocumentStore, ParameterAccessor};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub const STEP_UUID: &str = "0915b350-b929-4cbd-b0d4-763cac0bb69f";
pub const OTHER_STEP_UUID: &str = "c5a3e6e5-66b1-4c16-9f4e-8d0dfc07a1d2";

/// A pipeline definition shaped like the ones the orchestrator writes
pub fn sample_document() -> Value {
    json!({
        "name": "training",
        "uuid": "6a6b1b4c-9a53-4a27-a5c9-5d1e41a3b0a4",
        "version": "1.0",
        "settings": {"auto_eviction": false, "data_passing_memory_size": "1GB"},
        "parameters": {
            "b": 1,
            "d": 4,
            "nested": {"list": [1, 2.5, "x", null, true], "empty": {}},
            "flag": false,
            "nothing": null
        },
        "steps": {
            STEP_UUID: {
                "uuid": STEP_UUID,
                "title": "Train",
                "file_path": "train.ipynb",
                "kernel": {"display_name": "Python 3", "name": "python"},
                "incoming_connections": [OTHER_STEP_UUID],
                "meta_data": {"hidden": false, "position": [120, 80]},
                "parameters": {"a": 0, "c": 3}
            },
            OTHER_STEP_UUID: {
                "uuid": OTHER_STEP_UUID,
                "title": "Load",
                "file_path": "scripts/load.py",
                "incoming_connections": [],
                "parameters": {"rows": 1000}
            }
        }
    })
}

/// A pipeline definition written to a temporary directory
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new(document: &Value) -> Self {
        Self::with_text(&serde_json::to_string(document).unwrap())
    }

    pub fn with_text(text: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.orchest");
        std::fs::write(&path, text).unwrap();
        Self { _dir: dir, path }
    }

    pub fn sample() -> Self {
        Self::new(&sample_document())
    }

    /// Accessor pinned to `STEP_UUID`
    pub fn accessor(&self) -> ParameterAccessor<FileDocumentStore, FixedStepResolver> {
        self.accessor_for(STEP_UUID)
    }

    pub fn accessor_for(&self, step: &str) -> ParameterAccessor<FileDocumentStore, FixedStepResolver> {
        ParameterAccessor::new(
            FileDocumentStore::new(self.path.clone()),
            FixedStepResolver::new(step),
        )
    }

    pub fn store(&self) -> FileDocumentStore {
        FileDocumentStore::new(self.path.clone())
    }

    pub fn read_text(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }

    pub fn read_json(&self) -> Value {
        serde_json::from_str(&self.read_text()).unwrap()
    }
}

/// Build a parameter mapping from a JSON object literal
pub fn params(value: Value) -> Params {
    serde_json::from_value(value).expect("parameters must be a JSON object")
}
