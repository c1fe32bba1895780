//! Error types for parameter access

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which parameter mapping an operation addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamScope {
    Step,
    Pipeline,
}

impl fmt::Display for ParamScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamScope::Step => write!(f, "step"),
            ParamScope::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// Errors raised by the parameter accessor
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Failed to load pipeline definition")]
    Load(#[source] DocumentError),

    #[error("Parameters could not be identified.")]
    StepIdentity(#[source] ResolveError),

    #[error("Step not found in pipeline: {0}")]
    StepNotFound(String),

    #[error("Key not found in {scope} parameters: {key}")]
    KeyNotFound { scope: ParamScope, key: String },

    #[error("Failed to write pipeline definition")]
    Persist(#[source] DocumentError),
}

/// Errors reading or writing the pipeline definition document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pipeline definition in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize pipeline definition for {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors resolving the currently executing step
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Step identifier is not a valid UUID: {0}")]
    InvalidUuid(String),

    #[error("No step runs the file {0}")]
    NoMatchingStep(PathBuf),

    #[error("{0}")]
    Custom(String),
}

/// Errors building configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Invalid lock mode '{0}' (expected 'none' or 'process')")]
    InvalidLockMode(String),
}
