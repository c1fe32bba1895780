//! CLI output formatting

use crate::cli::commands::OutputFormat;
use crate::core::{ParamValue, Params};
use anyhow::Result;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");

/// Render a parameter value in the requested format
pub fn format_value(value: &ParamValue, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&to_yaml(value))?.trim_end().to_string(),
    };
    Ok(text)
}

/// Convert to a YAML value
///
/// Numbers that YAML cannot hold without rounding are emitted as strings.
fn to_yaml(value: &ParamValue) -> serde_yaml::Value {
    use serde_yaml::Value as Yaml;

    match value {
        ParamValue::Null => Yaml::Null,
        ParamValue::Bool(b) => Yaml::Bool(*b),
        ParamValue::Number(n) => {
            let text = n.to_string();
            if let Some(i) = n.as_i64() {
                Yaml::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Yaml::Number(u.into())
            } else {
                match n.as_f64() {
                    Some(f) if f.to_string() == text => Yaml::Number(f.into()),
                    _ => Yaml::String(text),
                }
            }
        }
        ParamValue::String(s) => Yaml::String(s.clone()),
        ParamValue::Array(items) => Yaml::Sequence(items.iter().map(to_yaml).collect()),
        ParamValue::Object(map) => Yaml::Mapping(
            map.iter()
                .map(|(k, v)| (Yaml::String(k.clone()), to_yaml(v)))
                .collect(),
        ),
    }
}

/// Render both parameter mappings, step first
pub fn format_params(step: &Params, pipeline: &Params, format: OutputFormat) -> Result<String> {
    let combined = serde_json::json!({
        "step": step,
        "pipeline": pipeline,
    });
    format_value(&combined, format)
}

/// Status line shown after a successful write
pub fn format_updated(scope: &str, keys: &[&str]) -> String {
    let keys = keys
        .iter()
        .map(|k| style(k).cyan().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} Updated {} parameters: {}", CHECK, style(scope).bold(), keys)
}
