//! Static runner: answers actions from a fixed table.
//!
//! Each `(role, cmd)` pair maps either to an outcome, returned on every call,
//! or to a failure message, returned as [`RunnerError::Action`]. Useful for
//! configuration-driven dry runs and as a test double.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::RunnerError;
use crate::runner::ActionRunner;
use crate::types::{ActionDescriptor, ActionOutcome, Entity};

/// The canned answer for one `(role, cmd)` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum StaticResponse {
    Outcome(ActionOutcome),
    Failure(String),
}

/// Runner that looks up each action's response in a table.
#[derive(Debug, Clone)]
pub struct StaticRunner {
    runner_id: String,
    responses: HashMap<(String, String), StaticResponse>,
}

impl StaticRunner {
    /// Create a static runner with no responses.
    pub fn new(runner_id: impl Into<String>) -> Self {
        StaticRunner {
            runner_id: runner_id.into(),
            responses: HashMap::new(),
        }
    }

    /// Create a static runner with pre-populated responses.
    pub fn with_responses(
        runner_id: impl Into<String>,
        responses: HashMap<(String, String), StaticResponse>,
    ) -> Self {
        StaticRunner {
            runner_id: runner_id.into(),
            responses,
        }
    }

    /// Answer `(role, cmd)` with `outcome`.
    pub fn insert_outcome(
        &mut self,
        role: impl Into<String>,
        cmd: impl Into<String>,
        outcome: ActionOutcome,
    ) {
        self.responses
            .insert((role.into(), cmd.into()), StaticResponse::Outcome(outcome));
    }

    /// Fail `(role, cmd)` with `message`.
    pub fn insert_failure(
        &mut self,
        role: impl Into<String>,
        cmd: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.responses.insert(
            (role.into(), cmd.into()),
            StaticResponse::Failure(message.into()),
        );
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[async_trait]
impl ActionRunner for StaticRunner {
    async fn run(
        &self,
        _context: Option<&serde_json::Value>,
        _entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        let key = (action.role.clone(), action.cmd.clone());
        match self.responses.get(&key) {
            Some(StaticResponse::Outcome(outcome)) => Ok(outcome.clone()),
            Some(StaticResponse::Failure(message)) => Err(RunnerError::Action(message.clone())),
            None => Err(RunnerError::Unhandled {
                role: action.role.clone(),
                cmd: action.cmd.clone(),
            }),
        }
    }

    fn runner_id(&self) -> &str {
        &self.runner_id
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
