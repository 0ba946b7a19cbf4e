//! Integration tests for `then_for_entity`.
//!
//! Covers:
//! 1. Missing arguments (no args, no entity, no then-arguments, no actions)
//! 2. Runner failure propagated with its exact message
//! 3. All actions succeed, one outcome per action, in order
//! 4. Repeated calls with a deterministic runner give the same result
//! 5. Context and entity handed to the runner untouched

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use thenflow_core::{
    then_for_entity, ActionDescriptor, ActionOutcome, ActionRunner, ActionSequencer, Entity,
    RunnerError, ThenArguments,
};

// ──────────────────────────────────────────────
// Test fixtures
// ──────────────────────────────────────────────

fn entity() -> Entity {
    Entity::new("i1", "John Doo")
}

fn then_args_default() -> ThenArguments {
    ThenArguments::new(vec![
        ActionDescriptor::new("r1", "c1"),
        ActionDescriptor::new("r2", "c2"),
    ])
}

/// A runner that succeeds with a fixed outcome name and records each call.
struct OkRunner {
    name: String,
    seen: Mutex<Vec<(Option<serde_json::Value>, Entity, ActionDescriptor)>>,
}

impl OkRunner {
    fn new(name: &str) -> Self {
        OkRunner {
            name: name.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl ActionRunner for OkRunner {
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        self.seen
            .lock()
            .unwrap()
            .push((context.cloned(), entity.clone(), action.clone()));
        Ok(ActionOutcome::succeeded(self.name.clone()))
    }

    fn runner_id(&self) -> &str {
        "ok"
    }
}

/// A runner that always fails with the given message and counts its calls.
struct ErrorRunner {
    message: String,
    calls: Mutex<usize>,
}

impl ErrorRunner {
    fn new(message: &str) -> Self {
        ErrorRunner {
            message: message.to_string(),
            calls: Mutex::new(0),
        }
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ActionRunner for ErrorRunner {
    async fn run(
        &self,
        _context: Option<&serde_json::Value>,
        _entity: &Entity,
        _action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        *self.calls.lock().unwrap() += 1;
        Err(RunnerError::action(self.message.clone()))
    }

    fn runner_id(&self) -> &str {
        "error"
    }
}

// ──────────────────────────────────────────────
// 1. Bad arguments
// ──────────────────────────────────────────────

#[tokio::test]
async fn no_args() {
    let runner = OkRunner::new("jobi");
    let result = then_for_entity(&runner, None, None, None).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn no_entity() {
    let runner = OkRunner::new("jobi");
    let result = then_for_entity(&runner, None, None, Some(&then_args_default()))
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn no_then_arguments() {
    let runner = OkRunner::new("jobi");
    let result = then_for_entity(&runner, None, Some(&entity()), None)
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn no_then_action() {
    let runner = OkRunner::new("jobi");
    let then_args = ThenArguments::new(vec![]);
    let result = then_for_entity(&runner, None, Some(&entity()), Some(&then_args))
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn missing_input_never_reaches_a_failing_runner() {
    let runner = ErrorRunner::new("should not run");
    let then_args = ThenArguments::default();
    let result = then_for_entity(&runner, None, Some(&entity()), Some(&then_args))
        .await
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(runner.call_count(), 0);
}

// ──────────────────────────────────────────────
// 2. Run action on error
// ──────────────────────────────────────────────

#[tokio::test]
async fn then_action_on_error() {
    let msg = "Oops, an action error!";
    let runner = ErrorRunner::new(msg);
    let err = then_for_entity(&runner, None, Some(&entity()), Some(&then_args_default()))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), msg);
    assert_eq!(err, RunnerError::action(msg));
    // The second action is never attempted.
    assert_eq!(runner.call_count(), 1);
}

// ──────────────────────────────────────────────
// 3. Run action OK
// ──────────────────────────────────────────────

#[tokio::test]
async fn then_action_ok() {
    let expected = then_args_default().actions().len();
    let runner = OkRunner::new("jobi");
    let result = then_for_entity(&runner, None, Some(&entity()), Some(&then_args_default()))
        .await
        .unwrap();
    assert_eq!(result.len(), expected);
    assert!(result
        .iter()
        .all(|o| *o == ActionOutcome::succeeded("jobi")));

    let seen = runner.seen.lock().unwrap();
    let cmds: Vec<_> = seen.iter().map(|(_, _, a)| a.cmd.as_str()).collect();
    assert_eq!(cmds, vec!["c1", "c2"]);
}

// ──────────────────────────────────────────────
// 4. Idempotence
// ──────────────────────────────────────────────

#[tokio::test]
async fn repeated_calls_give_the_same_result() {
    let sequencer = ActionSequencer::new(OkRunner::new("jobi"));
    let then_args = then_args_default();
    let first = sequencer
        .run_sequence(None, Some(&entity()), Some(&then_args))
        .await
        .unwrap();
    let second = sequencer
        .run_sequence(None, Some(&entity()), Some(&then_args))
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(sequencer.runner().call_count(), 4);
}

// ──────────────────────────────────────────────
// 5. Pass-through of context and entity
// ──────────────────────────────────────────────

#[tokio::test]
async fn context_and_entity_reach_the_runner_unchanged() {
    let runner = OkRunner::new("jobi");
    let context = json!({"tenant": "acme", "trace": [1, 2, 3]});
    let mut subject = entity();
    subject.fields.insert("tier".to_string(), json!("gold"));

    then_for_entity(&runner, Some(&context), Some(&subject), Some(&then_args_default()))
        .await
        .unwrap();

    let seen = runner.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for (ctx, ent, _) in seen.iter() {
        assert_eq!(ctx.as_ref(), Some(&context));
        assert_eq!(ent, &subject);
    }
}

#[tokio::test]
async fn then_arguments_parsed_from_json() {
    let then_args: ThenArguments = serde_json::from_value(json!({
        "actions": [
            { "role": "r1", "cmd": "c1" },
            { "role": "r2", "cmd": "c2" }
        ]
    }))
    .unwrap();
    let runner = OkRunner::new("jobi");
    let result = then_for_entity(&runner, None, Some(&entity()), Some(&then_args))
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!([
            {"success": true, "name": "jobi"},
            {"success": true, "name": "jobi"}
        ])
    );
}

#[tokio::test]
async fn backend_error_is_returned_unwrapped() {
    struct DownRunner;

    #[async_trait]
    impl ActionRunner for DownRunner {
        async fn run(
            &self,
            _context: Option<&serde_json::Value>,
            _entity: &Entity,
            _action: &ActionDescriptor,
        ) -> Result<ActionOutcome, RunnerError> {
            Err(RunnerError::Backend("connection reset".to_string()))
        }

        fn runner_id(&self) -> &str {
            "down"
        }
    }

    let err = then_for_entity(&DownRunner, None, Some(&entity()), Some(&then_args_default()))
        .await
        .unwrap_err();
    assert_eq!(err, RunnerError::Backend("connection reset".to_string()));
}
