//! Current-step resolution
//!
//! Which step is executing is a property of the environment the code runs
//! in. Resolution is passed to the accessor as a collaborator so callers
//! can pin a step explicitly instead of relying on process state.

use crate::core::{error::ResolveError, pipeline::PipelineDocument};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Environment variable naming the step a process executes
pub const STEP_UUID_VAR: &str = "ORCHEST_STEP_UUID";

/// Determines the identifier of the currently executing step
pub trait StepResolver {
    fn resolve(&self, pipeline: &PipelineDocument) -> Result<String, ResolveError>;
}

impl<F> StepResolver for F
where
    F: Fn(&PipelineDocument) -> Result<String, ResolveError>,
{
    fn resolve(&self, pipeline: &PipelineDocument) -> Result<String, ResolveError> {
        self(pipeline)
    }
}

/// Reads the step UUID from `ORCHEST_STEP_UUID`
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvStepResolver;

impl EnvStepResolver {
    pub fn new() -> Self {
        Self
    }

    fn parse(raw: &str) -> Result<String, ResolveError> {
        let raw = raw.trim();
        Uuid::parse_str(raw)
            .map(|_| raw.to_string())
            .map_err(|_| ResolveError::InvalidUuid(raw.to_string()))
    }
}

impl StepResolver for EnvStepResolver {
    fn resolve(&self, _pipeline: &PipelineDocument) -> Result<String, ResolveError> {
        let raw = std::env::var(STEP_UUID_VAR).map_err(|_| ResolveError::MissingEnv(STEP_UUID_VAR))?;
        let uuid = Self::parse(&raw)?;
        debug!(step = %uuid, "Resolved current step from environment");
        Ok(uuid)
    }
}

/// Always resolves to the same step identifier
#[derive(Debug, Clone)]
pub struct FixedStepResolver {
    uuid: String,
}

impl FixedStepResolver {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

impl StepResolver for FixedStepResolver {
    fn resolve(&self, _pipeline: &PipelineDocument) -> Result<String, ResolveError> {
        Ok(self.uuid.clone())
    }
}

/// Resolves the step whose `file_path` is the file currently running
///
/// Used where no step UUID is injected into the environment, such as an
/// interactive notebook kernel that only knows its notebook path.
#[derive(Debug, Clone)]
pub struct FilePathResolver {
    /// File being executed
    file: PathBuf,
    /// Directory the step file paths are relative to
    pipeline_dir: PathBuf,
}

impl FilePathResolver {
    pub fn new(file: impl Into<PathBuf>, pipeline_dir: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            pipeline_dir: pipeline_dir.into(),
        }
    }
}

impl StepResolver for FilePathResolver {
    fn resolve(&self, pipeline: &PipelineDocument) -> Result<String, ResolveError> {
        let step = pipeline
            .step_by_file_path(&self.file, &self.pipeline_dir)
            .ok_or_else(|| ResolveError::NoMatchingStep(self.file.clone()))?;
        debug!(step = %step.uuid, file = %self.file.display(), "Resolved current step from file path");
        Ok(step.uuid.clone())
    }
}
