//! Parameter accessor
//!
//! Reads and updates the parameters of the currently executing step and of
//! the pipeline. Every call loads the definition document afresh; mutating
//! calls write the whole document back once, at the end, only on success.
//!
//! Without locking, two processes updating parameters at the same time can
//! both load the old document and the later write wins. Pipeline-level
//! parameters are the ones at risk, since every step may touch them.

pub mod lock;

use crate::core::{
    params, ConfigError, EnvStepResolver, LockMode, ParamScope, ParamValue, Params, ParamsConfig,
    ParamsError, PipelineDocument, PipelineStep, StepResolver,
};
use crate::persistence::{DocumentStore, FileDocumentStore};
use tracing::{debug, info};

/// Read/update access to step and pipeline parameters
pub struct ParameterAccessor<S = FileDocumentStore, R = EnvStepResolver> {
    store: S,
    resolver: R,
    lock_mode: LockMode,
}

impl ParameterAccessor {
    /// Accessor configured from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(&ParamsConfig::from_env()?))
    }

    /// File-backed accessor resolving the step from the environment
    pub fn from_config(config: &ParamsConfig) -> Self {
        ParameterAccessor::new(
            FileDocumentStore::new(config.pipeline_path.clone()),
            EnvStepResolver::new(),
        )
        .with_lock_mode(config.lock_mode)
    }
}

impl<S: DocumentStore, R: StepResolver> ParameterAccessor<S, R> {
    pub fn new(store: S, resolver: R) -> Self {
        Self {
            store,
            resolver,
            lock_mode: LockMode::None,
        }
    }

    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parameters of the current step and of the pipeline, in that order
    pub fn get_params(&self) -> Result<(Params, Params), ParamsError> {
        self.guarded(|| {
            let mut pipeline = self.load()?;
            let step = self.current_step(&mut pipeline)?;
            let step_params = step.get_params().clone();
            Ok((step_params, pipeline.get_params().clone()))
        })
    }

    /// Shallow-merge parameters into the current step and/or the pipeline
    ///
    /// Keys that do not exist yet are added. The document is written back
    /// even when both arguments are `None`.
    pub fn update_params(
        &self,
        step_params: Option<&Params>,
        pipeline_params: Option<&Params>,
    ) -> Result<(), ParamsError> {
        self.apply_updates(step_params, pipeline_params, params::merge)
    }

    /// Like `update_params`, but nested objects are merged key by key
    /// instead of being replaced
    pub fn update_params_deep(
        &self,
        step_params: Option<&Params>,
        pipeline_params: Option<&Params>,
    ) -> Result<(), ParamsError> {
        self.apply_updates(step_params, pipeline_params, params::merge_deep)
    }

    /// A single parameter of the current step
    pub fn get_step_param(&self, key: &str) -> Result<ParamValue, ParamsError> {
        self.guarded(|| {
            let mut pipeline = self.load()?;
            let step = self.current_step(&mut pipeline)?;
            lookup(step.get_params(), ParamScope::Step, key)
        })
    }

    /// A single pipeline parameter
    pub fn get_pipeline_param(&self, key: &str) -> Result<ParamValue, ParamsError> {
        self.guarded(|| {
            let pipeline = self.load()?;
            lookup(pipeline.get_params(), ParamScope::Pipeline, key)
        })
    }

    /// Insert or overwrite a parameter of the current step
    pub fn update_step_param(&self, key: &str, value: ParamValue) -> Result<(), ParamsError> {
        self.guarded(|| {
            let mut pipeline = self.load()?;
            self.current_step(&mut pipeline)?.set_param(key, value);
            self.persist(&pipeline)
        })
    }

    /// Insert or overwrite a pipeline parameter
    pub fn update_pipeline_param(&self, key: &str, value: ParamValue) -> Result<(), ParamsError> {
        self.guarded(|| {
            let mut pipeline = self.load()?;
            pipeline.set_param(key, value);
            self.persist(&pipeline)
        })
    }

    fn apply_updates(
        &self,
        step_params: Option<&Params>,
        pipeline_params: Option<&Params>,
        merge: fn(&mut Params, &Params),
    ) -> Result<(), ParamsError> {
        self.guarded(|| {
            let mut pipeline = self.load()?;

            if let Some(partial) = pipeline_params {
                merge(&mut pipeline.parameters, partial);
            }

            if let Some(partial) = step_params {
                merge(&mut self.current_step(&mut pipeline)?.parameters, partial);
            }

            self.persist(&pipeline)
        })
    }

    fn load(&self) -> Result<PipelineDocument, ParamsError> {
        self.store.load().map_err(ParamsError::Load)
    }

    fn persist(&self, pipeline: &PipelineDocument) -> Result<(), ParamsError> {
        self.store.save(pipeline).map_err(ParamsError::Persist)?;
        info!(path = %self.store.location().display(), "Persisted pipeline parameters");
        Ok(())
    }

    fn current_step<'a>(
        &self,
        pipeline: &'a mut PipelineDocument,
    ) -> Result<&'a mut PipelineStep, ParamsError> {
        let uuid = self
            .resolver
            .resolve(pipeline)
            .map_err(ParamsError::StepIdentity)?;
        debug!(step = %uuid, "Resolved current step");
        pipeline
            .step_mut(&uuid)
            .ok_or(ParamsError::StepNotFound(uuid))
    }

    /// Run a load-modify-write cycle, holding the per-file lock if enabled
    fn guarded<T>(&self, op: impl FnOnce() -> Result<T, ParamsError>) -> Result<T, ParamsError> {
        match self.lock_mode {
            LockMode::None => op(),
            LockMode::Process => {
                let lock = lock::lock_for(self.store.location());
                let _guard = lock::acquire(&lock);
                debug!(path = %self.store.location().display(), "Acquired parameter lock");
                op()
            }
        }
    }
}

fn lookup(params: &Params, scope: ParamScope, key: &str) -> Result<ParamValue, ParamsError> {
    params
        .get(key)
        .cloned()
        .ok_or_else(|| ParamsError::KeyNotFound {
            scope,
            key: key.to_string(),
        })
}
