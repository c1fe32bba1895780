//! Parameter mappings and merge semantics
//!
//! Parameter values are arbitrary JSON. A mapping is a `serde_json::Map`,
//! which keeps keys sorted so serialized output is deterministic.

use serde_json::{Map, Value};

/// A single parameter value (string, number, bool, null, array or object)
pub type ParamValue = Value;

/// A string-keyed parameter mapping
pub type Params = Map<String, Value>;

/// Remove the `parameters` mapping from a JSON object, defaulting to empty
pub(crate) fn take_params(object: &mut Map<String, Value>, owner: &str) -> Result<Params, serde_json::Error> {
    match object.remove("parameters") {
        None => Ok(Params::new()),
        Some(Value::Object(params)) => Ok(params),
        Some(other) => Err(serde::de::Error::custom(format!(
            "{} parameters must be an object, found {}",
            owner, other
        ))),
    }
}

/// Shallow merge: every key of `partial` overwrites or is inserted into `target`.
///
/// Nested objects are replaced as a whole, never merged.
pub fn merge(target: &mut Params, partial: &Params) {
    for (key, value) in partial {
        target.insert(key.clone(), value.clone());
    }
}

/// Recursive merge: objects present on both sides are merged key by key,
/// any other value in `partial` replaces the one in `target`.
pub fn merge_deep(target: &mut Params, partial: &Params) {
    for (key, value) in partial {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (target.get_mut(key), value) {
            merge_deep(existing, incoming);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}
