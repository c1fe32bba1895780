//! Accessor configuration

use crate::core::error::ConfigError;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable holding the pipeline definition path
pub const PIPELINE_PATH_VAR: &str = "ORCHEST_PIPELINE_PATH";

/// Environment variable selecting the lock mode
pub const LOCK_MODE_VAR: &str = "ORCHEST_PARAMS_LOCK";

/// How load-modify-write cycles are guarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// No locking. Concurrent writers may lose updates.
    #[default]
    None,
    /// Serialize cycles on the same file within this process
    Process,
}

impl FromStr for LockMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(LockMode::None),
            "process" => Ok(LockMode::Process),
            other => Err(ConfigError::InvalidLockMode(other.to_string())),
        }
    }
}

/// Where the pipeline definition lives and how it is accessed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsConfig {
    /// Path to the pipeline definition document
    pub pipeline_path: PathBuf,

    /// Locking around read-modify-write cycles
    pub lock_mode: LockMode,
}

impl ParamsConfig {
    pub fn new(pipeline_path: impl Into<PathBuf>) -> Self {
        Self {
            pipeline_path: pipeline_path.into(),
            lock_mode: LockMode::default(),
        }
    }

    pub fn with_lock_mode(mut self, lock_mode: LockMode) -> Self {
        self.lock_mode = lock_mode;
        self
    }

    /// Load configuration from `ORCHEST_PIPELINE_PATH` and `ORCHEST_PARAMS_LOCK`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from the environment, preferring explicit values
    pub fn from_env_with(
        pipeline_path: Option<PathBuf>,
        lock_mode: Option<LockMode>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup_with(pipeline_path, lock_mode, |key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(None, None, lookup)
    }

    /// Load configuration through a lookup, preferring explicit values
    ///
    /// Each setting is only looked up when no explicit value is given, so an
    /// overridden variable is never validated.
    pub fn from_lookup_with<F>(
        pipeline_path: Option<PathBuf>,
        lock_mode: Option<LockMode>,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match pipeline_path {
            Some(path) => path,
            None => lookup(PIPELINE_PATH_VAR)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingVar(PIPELINE_PATH_VAR))?,
        };

        let lock_mode = match (lock_mode, lookup(LOCK_MODE_VAR)) {
            (Some(mode), _) => mode,
            (None, Some(raw)) => raw.parse()?,
            (None, None) => LockMode::default(),
        };

        Ok(Self::new(path).with_lock_mode(lock_mode))
    }

    /// Directory containing the pipeline definition
    pub fn pipeline_dir(&self) -> &Path {
        self.pipeline_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }
}
