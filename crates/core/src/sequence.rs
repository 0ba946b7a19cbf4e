//! Sequential execution of a then-block against an entity.
//!
//! Key invariant: actions run strictly one after the other. The runner for
//! action `i + 1` is only invoked once action `i` has settled successfully,
//! so later actions may depend on side effects of earlier ones. The first
//! failure ends the sequence and is returned as-is; outcomes gathered so far
//! are discarded.

use tracing::debug;

use crate::error::RunnerError;
use crate::runner::ActionRunner;
use crate::types::{ActionOutcome, Entity, ThenArguments};

/// Run every action of `then_args` against `entity`, in order.
///
/// Missing input is not an error: when the entity is absent, the
/// then-arguments are absent, or there are no actions, the result is an
/// empty list and the runner is never called.
///
/// On success the outcomes are returned in the same order as the actions.
/// On failure the runner's error is returned unchanged and no later action
/// is run.
pub async fn then_for_entity<R>(
    runner: &R,
    context: Option<&serde_json::Value>,
    entity: Option<&Entity>,
    then_args: Option<&ThenArguments>,
) -> Result<Vec<ActionOutcome>, RunnerError>
where
    R: ActionRunner + ?Sized,
{
    let (entity, actions) = match (entity, then_args) {
        (Some(entity), Some(then_args)) if !then_args.is_empty() => (entity, then_args.actions()),
        _ => return Ok(Vec::new()),
    };

    let mut outcomes = Vec::with_capacity(actions.len());
    for (index, action) in actions.iter().enumerate() {
        debug!(
            entity_id = %entity.id,
            index,
            role = %action.role,
            cmd = %action.cmd,
            runner = runner.runner_id(),
            "running then action"
        );
        match runner.run(context, entity, action).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                debug!(
                    entity_id = %entity.id,
                    index,
                    role = %action.role,
                    cmd = %action.cmd,
                    error = %e,
                    "then action failed"
                );
                return Err(e);
            }
        }
    }

    debug!(entity_id = %entity.id, count = outcomes.len(), "then actions completed");
    Ok(outcomes)
}

/// Runs then-blocks through an injected runner.
///
/// Holds no state besides the runner, so a single sequencer can serve any
/// number of independent calls.
#[derive(Debug, Clone)]
pub struct ActionSequencer<R> {
    runner: R,
}

impl<R: ActionRunner> ActionSequencer<R> {
    pub fn new(runner: R) -> Self {
        ActionSequencer { runner }
    }

    /// The injected runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// See [`then_for_entity`].
    pub async fn run_sequence(
        &self,
        context: Option<&serde_json::Value>,
        entity: Option<&Entity>,
        then_args: Option<&ThenArguments>,
    ) -> Result<Vec<ActionOutcome>, RunnerError> {
        then_for_entity(&self.runner, context, entity, then_args).await
    }

    /// Run the same then-block against several entities, one after another.
    ///
    /// Returns one outcome list per entity, in entity order. The first
    /// failure stops the whole batch and is returned unchanged.
    pub async fn run_for_entities(
        &self,
        context: Option<&serde_json::Value>,
        entities: &[Entity],
        then_args: Option<&ThenArguments>,
    ) -> Result<Vec<Vec<ActionOutcome>>, RunnerError> {
        let mut results = Vec::with_capacity(entities.len());
        for entity in entities {
            results.push(self.run_sequence(context, Some(entity), then_args).await?);
        }
        Ok(results)
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
