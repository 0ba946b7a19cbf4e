/// All errors that an [`ActionRunner`](crate::ActionRunner) can fail with.
///
/// The sequencer hands these back to its caller untouched, so the message a
/// runner produces is exactly the message the caller sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    /// The action itself failed. Displays the runner's message verbatim.
    #[error("{0}")]
    Action(String),

    /// No runner is registered for the action's role.
    #[error("no runner registered for role '{role}'")]
    NoRunner { role: String },

    /// The runner does not know how to handle this role/command pair.
    #[error("unhandled action: role '{role}', cmd '{cmd}'")]
    Unhandled { role: String, cmd: String },

    /// A transport or backend-specific failure inside the runner.
    #[error("runner backend error: {0}")]
    Backend(String),
}

impl RunnerError {
    /// Convenience constructor for a plain action failure.
    pub fn action(message: impl Into<String>) -> Self {
        RunnerError::Action(message.into())
    }
}
