//! Runner configuration format for `thenflow run`.
//!
//! The runner TOML lists the canned answer for each `(role, cmd)` pair.
//! Every role gets its own static runner, registered under that role.
//!
//! # Example
//!
//! ```toml
//! [[actions]]
//! role = "r1"
//! cmd = "c1"
//! name = "jobi"
//!
//! [actions.fields]
//! note = "anything"
//!
//! [[actions]]
//! role = "r2"
//! cmd = "c2"
//! error = "Oops, an action error!"
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use thenflow_core::{ActionOutcome, RunnerRegistry, StaticRunner};

use crate::CliError;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

/// `[[actions]]` entry: the answer for one `(role, cmd)` pair.
///
/// Exactly one of `name` (succeed with that outcome) or `error` (fail with
/// that message) must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionConfig {
    pub role: String,
    pub cmd: String,
    /// Outcome name reported on success.
    pub name: Option<String>,
    #[serde(default = "default_success")]
    pub success: bool,
    /// Failure message; makes the action fail.
    pub error: Option<String>,
    /// Extra outcome fields.
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

fn default_success() -> bool {
    true
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a runner config TOML file from `path`.
pub(crate) fn read_runner_config(path: &Path) -> Result<RunnerConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| CliError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Check that every entry is well-formed and no `(role, cmd)` pair repeats.
///
/// Returns `Ok(())` if valid, or `Err(Vec<String>)` listing all problems.
pub(crate) fn validate_runner_config(config: &RunnerConfig) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();
    let mut seen = BTreeSet::new();

    for (i, action) in config.actions.iter().enumerate() {
        let label = format!("actions[{}] ({}/{})", i, action.role, action.cmd);
        if action.role.is_empty() || action.cmd.is_empty() {
            problems.push(format!("{}: role and cmd must not be empty", label));
        }
        match (&action.name, &action.error) {
            (Some(_), Some(_)) => {
                problems.push(format!("{}: set either 'name' or 'error', not both", label))
            }
            (None, None) => {
                problems.push(format!("{}: one of 'name' or 'error' is required", label))
            }
            _ => {}
        }
        if !seen.insert((action.role.as_str(), action.cmd.as_str())) {
            problems.push(format!("{}: duplicate role/cmd pair", label));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Build a registry with one static runner per role.
///
/// Assumes the config already passed [`validate_runner_config`].
pub(crate) fn build_registry(config: &RunnerConfig) -> RunnerRegistry {
    let mut by_role: BTreeMap<&str, StaticRunner> = BTreeMap::new();

    for action in &config.actions {
        let runner = by_role
            .entry(action.role.as_str())
            .or_insert_with(|| StaticRunner::new(action.role.clone()));
        match (&action.error, &action.name) {
            (Some(message), _) => runner.insert_failure(&action.role, &action.cmd, message),
            (None, Some(name)) => {
                let mut outcome = ActionOutcome::new(action.success, name);
                outcome.fields = action.fields.clone();
                runner.insert_outcome(&action.role, &action.cmd, outcome);
            }
            (None, None) => {}
        }
    }

    let mut registry = RunnerRegistry::empty();
    for (role, runner) in by_role {
        registry.register(role, Box::new(runner));
    }
    registry
}

// ── Tests ─────────────────────────────────────────────────────────────────────
