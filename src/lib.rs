//! pipeline-params - read and update parameters of pipeline steps
//!
//! Parameters live in the pipeline definition file. Step parameters belong
//! to the step that is currently executing; pipeline parameters are shared
//! by all steps.

pub mod accessor;
pub mod cli;
pub mod core;
pub mod persistence;

// Re-export commonly used types
pub use accessor::ParameterAccessor;
pub use crate::core::{
    EnvStepResolver, FilePathResolver, FixedStepResolver, LockMode, ParamValue, Params,
    ParamsConfig, ParamsError, PipelineDocument, PipelineStep, StepResolver,
};
pub use persistence::{DocumentStore, FileDocumentStore, InMemoryDocumentStore};
