//! Core domain models for parameter access
//!
//! This module defines the pipeline definition document, its steps, the
//! parameter mappings attached to both, and how the current step is found.

pub mod config;
pub mod context;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod step;

pub use config::{LockMode, ParamsConfig, LOCK_MODE_VAR, PIPELINE_PATH_VAR};
pub use context::{EnvStepResolver, FilePathResolver, FixedStepResolver, StepResolver, STEP_UUID_VAR};
pub use error::{ConfigError, DocumentError, ParamScope, ParamsError, ResolveError};
pub use params::{merge, merge_deep, ParamValue, Params};
pub use pipeline::PipelineDocument;
pub use step::PipelineStep;
