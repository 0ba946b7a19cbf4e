//! Role-based runner dispatch.
//!
//! Actions name the role that should handle them. [`RunnerRegistry`] maps
//! each role to the runner that owns it and is itself an [`ActionRunner`],
//! so a registry can be handed straight to the sequencer.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::trace;

use crate::error::RunnerError;
use crate::runner::ActionRunner;
use crate::types::{ActionDescriptor, ActionOutcome, Entity};

/// Registry that maps roles to their runners.
///
/// Lookup order for an action:
/// 1. The runner registered for `action.role`
/// 2. The fallback runner, if one is set
/// 3. Otherwise `RunnerError::NoRunner`
#[derive(Default)]
pub struct RunnerRegistry {
    runners: HashMap<String, Box<dyn ActionRunner>>,
    fallback: Option<Box<dyn ActionRunner>>,
}

impl RunnerRegistry {
    /// Create an empty registry (no runners registered).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a runner for a role, replacing any previous one.
    pub fn register(&mut self, role: impl Into<String>, runner: Box<dyn ActionRunner>) {
        self.runners.insert(role.into(), runner);
    }

    /// Set the runner used for roles with no registration.
    pub fn set_fallback(&mut self, runner: Box<dyn ActionRunner>) {
        self.fallback = Some(runner);
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.runners.contains_key(role)
    }

    /// Registered roles, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self.runners.keys().map(String::as_str).collect();
        roles.sort_unstable();
        roles
    }

    fn resolve(&self, role: &str) -> Result<&dyn ActionRunner, RunnerError> {
        self.runners
            .get(role)
            .or(self.fallback.as_ref())
            .map(|r| r.as_ref())
            .ok_or_else(|| RunnerError::NoRunner {
                role: role.to_string(),
            })
    }
}

#[async_trait]
impl ActionRunner for RunnerRegistry {
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        let runner = self.resolve(&action.role)?;
        trace!(role = %action.role, runner = runner.runner_id(), "dispatching action");
        runner.run(context, entity, action).await
    }

    fn runner_id(&self) -> &str {
        "registry"
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
