//! CLI command definitions

use crate::core::{LockMode, ParamValue, Params};
use clap::Args;

/// Show one parameter of the current step
#[derive(Debug, Args, Clone)]
pub struct GetStepCommand {
    /// Parameter name
    pub key: String,
}

/// Show one pipeline parameter
#[derive(Debug, Args, Clone)]
pub struct GetPipelineCommand {
    /// Parameter name
    pub key: String,
}

/// Set a single parameter
#[derive(Debug, Args, Clone)]
pub struct SetCommand {
    /// Parameter name
    pub key: String,

    /// New value, as JSON (anything that is not valid JSON is stored as a string)
    #[arg(value_parser = parse_value)]
    pub value: ParamValue,
}

/// Merge parameters
#[derive(Debug, Args, Clone)]
pub struct UpdateCommand {
    /// JSON object merged into the current step's parameters
    #[arg(long, value_parser = parse_params)]
    pub step: Option<Params>,

    /// JSON object merged into the pipeline parameters
    #[arg(long, value_parser = parse_params)]
    pub pipeline: Option<Params>,

    /// Merge nested objects key by key instead of replacing them
    #[arg(long)]
    pub deep: bool,
}

/// Lock mode argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LockModeArg {
    None,
    Process,
}

impl From<LockModeArg> for LockMode {
    fn from(arg: LockModeArg) -> Self {
        match arg {
            LockModeArg::None => LockMode::None,
            LockModeArg::Process => LockMode::Process,
        }
    }
}

/// Output format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Parse a parameter value, falling back to a plain string
pub fn parse_value(s: &str) -> Result<ParamValue, String> {
    Ok(serde_json::from_str(s).unwrap_or_else(|_| ParamValue::String(s.to_string())))
}

/// Parse a JSON object of parameters
pub fn parse_params(s: &str) -> Result<Params, String> {
    serde_json::from_str::<Params>(s).map_err(|e| format!("Expected a JSON object: {}", e))
}
