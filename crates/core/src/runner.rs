//! The per-action runner abstraction.
//!
//! An [`ActionRunner`] executes ONE action descriptor against ONE entity.
//! The sequencer is agnostic to what a runner does: it may call a remote
//! service, touch a database or just answer from a table.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RunnerError;
use crate::types::{ActionDescriptor, ActionOutcome, Entity};

/// Executes a single action against an entity.
///
/// `context` is an opaque caller-supplied value handed through unexamined;
/// it may be absent.
#[async_trait]
pub trait ActionRunner: Send + Sync {
    /// Run one action and report its outcome.
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError>;

    /// Returns this runner's identifier (e.g. "static", "registry").
    fn runner_id(&self) -> &str;
}

#[async_trait]
impl<R: ActionRunner + ?Sized> ActionRunner for &R {
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        (**self).run(context, entity, action).await
    }

    fn runner_id(&self) -> &str {
        (**self).runner_id()
    }
}

#[async_trait]
impl<R: ActionRunner + ?Sized> ActionRunner for Box<R> {
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        (**self).run(context, entity, action).await
    }

    fn runner_id(&self) -> &str {
        (**self).runner_id()
    }
}

#[async_trait]
impl<R: ActionRunner + ?Sized> ActionRunner for Arc<R> {
    async fn run(
        &self,
        context: Option<&serde_json::Value>,
        entity: &Entity,
        action: &ActionDescriptor,
    ) -> Result<ActionOutcome, RunnerError> {
        (**self).run(context, entity, action).await
    }

    fn runner_id(&self) -> &str {
        (**self).runner_id()
    }
}
