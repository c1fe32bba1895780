//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{
    GetPipelineCommand, GetStepCommand, LockModeArg, OutputFormat, SetCommand, UpdateCommand,
};
use std::ffi::OsString;

/// Read and update pipeline and step parameters
#[derive(Debug, Parser, Clone)]
#[command(name = "pipeline-params")]
#[command(author = "Pipeline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Read and update parameters in a pipeline definition", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the pipeline definition (defaults to $ORCHEST_PIPELINE_PATH)
    #[arg(short, long, global = true)]
    pub pipeline_file: Option<String>,

    /// UUID of the current step (defaults to $ORCHEST_STEP_UUID)
    #[arg(short, long, global = true)]
    pub step_uuid: Option<String>,

    /// File the current step runs, relative to the pipeline directory
    #[arg(long, global = true, conflicts_with = "step_uuid")]
    pub file: Option<String>,

    /// Locking around read-modify-write (defaults to $ORCHEST_PARAMS_LOCK)
    #[arg(long, value_enum, global = true)]
    pub lock: Option<LockModeArg>,

    /// Output format for parameter values
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show the current step's and the pipeline's parameters
    Get,

    /// Show one parameter of the current step
    GetStep(GetStepCommand),

    /// Show one pipeline parameter
    GetPipeline(GetPipelineCommand),

    /// Set one parameter of the current step
    SetStep(SetCommand),

    /// Set one pipeline parameter
    SetPipeline(SetCommand),

    /// Merge JSON objects into the step and/or pipeline parameters
    Update(UpdateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
