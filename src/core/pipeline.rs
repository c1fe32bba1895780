//! Pipeline definition document model

use crate::core::{
    params::{self, ParamValue, Params},
    step::PipelineStep,
};
use serde::de::Error as _;
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Indentation used when writing the document back
const INDENT: &[u8] = b"    ";

/// A pipeline definition as stored on disk
///
/// Steps are keyed by their UUID. Fields this crate does not interpret
/// are kept in `extra` so a load/save cycle leaves them untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDocument {
    /// Pipeline-level parameters
    pub parameters: Params,

    /// Steps keyed by step UUID
    pub steps: BTreeMap<String, PipelineStep>,

    /// Remaining pipeline metadata (name, uuid, version, settings, ...)
    pub extra: Map<String, Value>,
}

impl PipelineDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Build a document from an already parsed JSON value
    ///
    /// Values are moved as-is, so numbers keep their exact textual form.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut extra = match value {
            Value::Object(object) => object,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "pipeline definition must be an object, found {}",
                    other
                )))
            }
        };

        let parameters = params::take_params(&mut extra, "pipeline")?;
        let steps: BTreeMap<String, PipelineStep> = match extra.remove("steps") {
            None => BTreeMap::new(),
            Some(Value::Object(steps)) => steps
                .into_iter()
                .map(|(key, step)| PipelineStep::from_value(step).map(|step| (key, step)))
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "steps must be an object, found {}",
                    other
                )))
            }
        };

        Ok(Self {
            parameters,
            steps,
            extra,
        })
    }

    /// Convert the document back to a JSON value
    ///
    /// Objects in the result have their keys in sorted order.
    pub fn to_value(&self) -> Value {
        let steps = self
            .steps
            .iter()
            .map(|(key, step)| (key.clone(), step.to_value()))
            .collect();

        let mut object = self.extra.clone();
        object.insert("parameters".to_string(), Value::Object(self.parameters.clone()));
        object.insert("steps".to_string(), Value::Object(steps));
        Value::Object(object)
    }

    /// Serialize with sorted keys and 4-space indentation
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.to_value().serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e))
    }

    /// Get a step by UUID
    pub fn step(&self, uuid: &str) -> Option<&PipelineStep> {
        self.steps
            .get(uuid)
            .or_else(|| self.steps.values().find(|s| s.uuid == uuid))
    }

    /// Get a mutable step by UUID
    pub fn step_mut(&mut self, uuid: &str) -> Option<&mut PipelineStep> {
        let key = self.step_key(uuid)?;
        self.steps.get_mut(&key)
    }

    /// Find the step that runs `path`
    ///
    /// Step file paths are relative to `pipeline_dir`; both sides are
    /// compared after joining, without touching the filesystem.
    pub fn step_by_file_path(&self, path: &Path, pipeline_dir: &Path) -> Option<&PipelineStep> {
        let wanted = pipeline_dir.join(path);
        self.steps.values().find(|step| {
            step.file_path()
                .is_some_and(|file| pipeline_dir.join(file) == wanted)
        })
    }

    /// Get the pipeline parameters
    pub fn get_params(&self) -> &Params {
        &self.parameters
    }

    /// Insert or overwrite a single pipeline parameter
    pub fn set_param(&mut self, key: impl Into<String>, value: ParamValue) {
        self.parameters.insert(key.into(), value);
    }

    fn step_key(&self, uuid: &str) -> Option<String> {
        if self.steps.contains_key(uuid) {
            return Some(uuid.to_string());
        }
        self.steps
            .iter()
            .find(|(_, s)| s.uuid == uuid)
            .map(|(key, _)| key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "training",
            "uuid": "6a6b1b4c-9a53-4a27-a5c9-5d1e41a3b0a4",
            "version": "1.0",
            "parameters": {"seed": 42},
            "settings": {"auto_eviction": false},
            "steps": {
                "0915b350-b929-4cbd-b0d4-763cac0bb69f": {
                    "uuid": "0915b350-b929-4cbd-b0d4-763cac0bb69f",
                    "title": "Load",
                    "file_path": "load.py",
                    "parameters": {"rows": 100}
                },
                "c5a3e6e5-66b1-4c16-9f4e-8d0dfc07a1d2": {
                    "uuid": "c5a3e6e5-66b1-4c16-9f4e-8d0dfc07a1d2",
                    "title": "Train",
                    "file_path": "notebooks/train.ipynb",
                    "parameters": {}
                }
            }
        })
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let doc = PipelineDocument::from_value(sample()).unwrap();
        assert_eq!(doc.to_value(), sample());
    }

    #[test]
    fn test_step_lookup() {
        let doc = PipelineDocument::from_value(sample()).unwrap();
        let step = doc.step("0915b350-b929-4cbd-b0d4-763cac0bb69f").unwrap();
        assert_eq!(step.get_params().get("rows"), Some(&json!(100)));
        assert!(doc.step("missing").is_none());
    }

    #[test]
    fn test_step_lookup_by_uuid_field() {
        let doc = PipelineDocument::from_value(json!({
            "parameters": {},
            "steps": {"first": {"uuid": "abc", "parameters": {"x": 1}}}
        }))
        .unwrap();
        assert_eq!(doc.step("abc").unwrap().uuid, "abc");

        let mut doc = doc;
        doc.step_mut("abc").unwrap().set_param("x", json!(2));
        assert_eq!(doc.steps["first"].parameters["x"], json!(2));
    }

    #[test]
    fn test_step_by_file_path() {
        let doc = PipelineDocument::from_value(sample()).unwrap();
        let dir = Path::new("/project");

        let step = doc
            .step_by_file_path(Path::new("notebooks/train.ipynb"), dir)
            .unwrap();
        assert_eq!(step.uuid, "c5a3e6e5-66b1-4c16-9f4e-8d0dfc07a1d2");

        let step = doc
            .step_by_file_path(Path::new("/project/load.py"), dir)
            .unwrap();
        assert_eq!(step.uuid, "0915b350-b929-4cbd-b0d4-763cac0bb69f");

        assert!(doc.step_by_file_path(Path::new("other.py"), dir).is_none());
    }

    #[test]
    fn test_pretty_json_sorts_keys_and_indents_four_spaces() {
        let doc = PipelineDocument::from_value(json!({
            "steps": {},
            "name": "p",
            "parameters": {"b": 1, "a": [true, null]}
        }))
        .unwrap();

        let expected = "{\n    \"name\": \"p\",\n    \"parameters\": {\n        \"a\": [\n            true,\n            null\n        ],\n        \"b\": 1\n    },\n    \"steps\": {}\n}";
        assert_eq!(doc.to_pretty_json().unwrap(), expected);
    }

    #[test]
    fn test_big_numbers_keep_their_exact_text() {
        let text = r#"{"parameters": {"big": 123456789012345678901234567890, "pi": 3.14159265358979323846264338327950288}, "steps": {}, "counter": -98765432109876543210}"#;
        let doc = PipelineDocument::from_json(text).unwrap();
        let written = doc.to_pretty_json().unwrap();

        assert!(written.contains("\"big\": 123456789012345678901234567890"));
        assert!(written.contains("\"pi\": 3.14159265358979323846264338327950288"));
        assert!(written.contains("\"counter\": -98765432109876543210"));
    }

    #[test]
    fn test_invalid_shape_is_rejected() {
        assert!(PipelineDocument::from_json("{\"parameters\": []}").is_err());
        assert!(PipelineDocument::from_json("not json").is_err());
        assert!(PipelineDocument::from_json("[]").is_err());
        assert!(PipelineDocument::from_json("{\"steps\": [1]}").is_err());
        assert!(PipelineDocument::from_json("{\"steps\": {\"s\": {\"title\": \"no uuid\"}}}").is_err());
    }
}
