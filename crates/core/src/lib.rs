//! Then-action sequencing for a single entity.
//!
//! A "then" block attaches an ordered list of actions to an entity. The
//! [`then_for_entity`] operation runs those actions one at a time through a
//! pluggable [`ActionRunner`], collecting every outcome or stopping at the
//! first failure.
//!
//! Runners are injected rather than patched: tests and callers supply any
//! `ActionRunner` implementation, including the bundled [`RunnerRegistry`]
//! (dispatch by role) and [`StaticRunner`] (fixed answers).

pub mod error;
pub mod registry;
pub mod runner;
pub mod sequence;
pub mod static_runner;
pub mod types;

pub use error::RunnerError;
pub use registry::RunnerRegistry;
pub use runner::ActionRunner;
pub use sequence::{then_for_entity, ActionSequencer};
pub use static_runner::StaticRunner;
pub use types::{ActionDescriptor, ActionOutcome, Entity, ThenArguments};
