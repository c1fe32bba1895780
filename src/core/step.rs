//! Step domain model

use crate::core::params::{self, ParamValue, Params};
use serde::de::Error as _;
use serde_json::{Map, Value};

/// A single step in a pipeline definition
///
/// Only the identifier and the parameter mapping are interpreted; every
/// other field of the step object is carried through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStep {
    /// Unique step identifier (UUID string)
    pub uuid: String,

    /// Step-level parameters
    pub parameters: Params,

    /// Remaining step fields (title, file_path, incoming_connections, ...)
    pub extra: Map<String, Value>,
}

impl PipelineStep {
    /// Create a step with no parameters
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            parameters: Params::new(),
            extra: Map::new(),
        }
    }

    /// Build a step from its JSON object
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let mut extra = match value {
            Value::Object(object) => object,
            other => {
                return Err(serde_json::Error::custom(format!(
                    "step must be an object, found {}",
                    other
                )))
            }
        };

        let uuid = match extra.remove("uuid") {
            Some(Value::String(uuid)) => uuid,
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "step uuid must be a string, found {}",
                    other
                )))
            }
            None => return Err(serde_json::Error::missing_field("uuid")),
        };
        let parameters = params::take_params(&mut extra, "step")?;

        Ok(Self {
            uuid,
            parameters,
            extra,
        })
    }

    /// Convert the step back to its JSON object
    pub fn to_value(&self) -> Value {
        let mut object = self.extra.clone();
        object.insert("uuid".to_string(), Value::String(self.uuid.clone()));
        object.insert("parameters".to_string(), Value::Object(self.parameters.clone()));
        Value::Object(object)
    }

    /// Get the step parameters
    pub fn get_params(&self) -> &Params {
        &self.parameters
    }

    /// Insert or overwrite a single step parameter
    pub fn set_param(&mut self, key: impl Into<String>, value: ParamValue) {
        self.parameters.insert(key.into(), value);
    }

    /// The file this step runs, if the definition names one
    pub fn file_path(&self) -> Option<&str> {
        self.extra.get("file_path").and_then(Value::as_str)
    }
}
