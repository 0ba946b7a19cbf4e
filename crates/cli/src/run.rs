use std::path::Path;
use std::process;

use serde::de::DeserializeOwned;
use thenflow_core::{ActionOutcome, ActionSequencer, Entity, ThenArguments};
use tracing::info;

use crate::config::{build_registry, read_runner_config, validate_runner_config};
use crate::{report_error, CliError, OutputFormat};

/// Paths handed to `thenflow run`.
pub(crate) struct RunOptions<'a> {
    pub entity: &'a Path,
    pub then_args: &'a Path,
    pub runners: &'a Path,
    pub context: Option<&'a Path>,
    pub output: OutputFormat,
    pub quiet: bool,
}

/// Read a JSON file into `T`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::Json {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// The entity a run targeted, if any, and the outcomes it produced.
type RunResult = (Option<Entity>, Vec<ActionOutcome>);

async fn execute(opts: &RunOptions<'_>) -> Result<RunResult, CliError> {
    let config = read_runner_config(opts.runners)?;
    validate_runner_config(&config).map_err(CliError::InvalidConfig)?;

    let entity: Option<Entity> = read_json(opts.entity)?;
    let then_args: Option<ThenArguments> = read_json(opts.then_args)?;
    let context: Option<serde_json::Value> = match opts.context {
        Some(path) => Some(read_json(path)?),
        None => None,
    };

    let sequencer = ActionSequencer::new(build_registry(&config));
    let outcomes = sequencer
        .run_sequence(context.as_ref(), entity.as_ref(), then_args.as_ref())
        .await?;
    info!(count = outcomes.len(), "then actions finished");
    Ok((entity, outcomes))
}

pub(crate) fn cmd_run(opts: RunOptions<'_>) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to start async runtime: {}", e),
                opts.output,
                opts.quiet,
            );
            process::exit(1);
        }
    };

    let (entity, outcomes) = match rt.block_on(execute(&opts)) {
        Ok(result) => result,
        Err(e) => {
            report_error(&e.to_string(), opts.output, opts.quiet);
            process::exit(1);
        }
    };

    if opts.quiet {
        return;
    }
    match opts.output {
        OutputFormat::Json => {
            let executed_at = time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string());
            let report = serde_json::json!({
                "entity_id": entity.as_ref().map(|e| e.id.as_str()),
                "outcomes": outcomes,
                "executed_at": executed_at,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|e| format!("serialization error: {}", e))
            );
        }
        OutputFormat::Text => {
            if outcomes.is_empty() {
                println!("no actions run");
            }
            for (i, outcome) in outcomes.iter().enumerate() {
                let status = if outcome.success { "success" } else { "failure" };
                println!("{}. {} ({})", i + 1, outcome.name, status);
            }
        }
    }
}

pub(crate) fn cmd_check(runners: &Path, output: OutputFormat, quiet: bool) {
    let config = match read_runner_config(runners) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    if let Err(problems) = validate_runner_config(&config) {
        report_error(&CliError::InvalidConfig(problems).to_string(), output, quiet);
        process::exit(1);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "valid": true, "actions": config.actions.len() })
        ),
        OutputFormat::Text => println!(
            "{}: {} actions configured",
            runners.display(),
            config.actions.len()
        ),
    }
}
