use anyhow::{Context, Result};
use pipeline_params::accessor::ParameterAccessor;
use pipeline_params::cli::output::{format_params, format_updated, format_value, style, CROSS, INFO};
use pipeline_params::cli::{Cli, Command};
use pipeline_params::core::{
    ConfigError, EnvStepResolver, FilePathResolver, FixedStepResolver, LockMode, ParamsConfig,
    StepResolver, LOCK_MODE_VAR, PIPELINE_PATH_VAR,
};
use pipeline_params::persistence::{DocumentStore, FileDocumentStore};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let config = load_config(&cli)?;
    debug!(path = %config.pipeline_path.display(), lock = ?config.lock_mode, "Using pipeline definition");

    let store = FileDocumentStore::new(config.pipeline_path.clone());
    let result = match (&cli.step_uuid, &cli.file) {
        (Some(uuid), _) => run(&cli, store, FixedStepResolver::new(uuid.clone()), config.lock_mode),
        (None, Some(file)) => {
            let resolver = FilePathResolver::new(file, config.pipeline_dir());
            run(&cli, store, resolver, config.lock_mode)
        }
        (None, None) => run(&cli, store, EnvStepResolver::new(), config.lock_mode),
    };

    if let Err(e) = result {
        eprintln!("{} {}", CROSS, style(&e).red());
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", INFO, style(cause).dim());
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Build configuration from flags, falling back to the environment
fn load_config(cli: &Cli) -> Result<ParamsConfig> {
    let pipeline_path = cli.pipeline_file.as_ref().map(PathBuf::from);
    let lock_mode = cli.lock.map(LockMode::from);

    match ParamsConfig::from_env_with(pipeline_path, lock_mode) {
        Ok(config) => Ok(config),
        Err(e @ ConfigError::MissingVar(_)) => {
            Err(e).with_context(|| format!("Pass --pipeline-file or set {}", PIPELINE_PATH_VAR))
        }
        Err(e) => Err(e).with_context(|| format!("Pass --lock or fix {}", LOCK_MODE_VAR)),
    }
}

fn run<S, R>(cli: &Cli, store: S, resolver: R, lock_mode: LockMode) -> Result<()>
where
    S: DocumentStore,
    R: StepResolver,
{
    let accessor = ParameterAccessor::new(store, resolver).with_lock_mode(lock_mode);

    match &cli.command {
        Command::Get => {
            let (step, pipeline) = accessor.get_params()?;
            println!("{}", format_params(&step, &pipeline, cli.format)?);
        }
        Command::GetStep(cmd) => {
            let value = accessor.get_step_param(&cmd.key)?;
            println!("{}", format_value(&value, cli.format)?);
        }
        Command::GetPipeline(cmd) => {
            let value = accessor.get_pipeline_param(&cmd.key)?;
            println!("{}", format_value(&value, cli.format)?);
        }
        Command::SetStep(cmd) => {
            accessor.update_step_param(&cmd.key, cmd.value.clone())?;
            println!("{}", format_updated("step", &[cmd.key.as_str()]));
        }
        Command::SetPipeline(cmd) => {
            accessor.update_pipeline_param(&cmd.key, cmd.value.clone())?;
            println!("{}", format_updated("pipeline", &[cmd.key.as_str()]));
        }
        Command::Update(cmd) => {
            if cmd.deep {
                accessor.update_params_deep(cmd.step.as_ref(), cmd.pipeline.as_ref())?;
            } else {
                accessor.update_params(cmd.step.as_ref(), cmd.pipeline.as_ref())?;
            }
            if let Some(step) = &cmd.step {
                let keys: Vec<&str> = step.keys().map(String::as_str).collect();
                println!("{}", format_updated("step", &keys));
            }
            if let Some(pipeline) = &cmd.pipeline {
                let keys: Vec<&str> = pipeline.keys().map(String::as_str).collect();
                println!("{}", format_updated("pipeline", &keys));
            }
        }
    }

    Ok(())
}
