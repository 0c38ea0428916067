//! Error taxonomy for the task core.

use thiserror::Error;

use super::task::TaskId;

/// Errors surfaced by the store, scheduler and calendar bridge.
///
/// Classification drives caller behavior:
/// - `Validation` / `NotFound` / `Precondition`: bad request, never retried.
/// - `Auth`: recoverable only by re-running the external authorization flow;
///   the core never auto-retries it.
/// - `Provider`: the external calendar call failed; the task stays in a state
///   where `sync` can be re-invoked.
/// - `Persistence`: the durable write failed; the triggering operation is
///   rejected, not partially applied.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("task {0} not found")]
    NotFound(TaskId),

    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("calendar credential unavailable: {0}")]
    Auth(String),

    #[error("calendar provider error: {0}")]
    Provider(String),

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl TaskError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}
