//! Task status: the lifecycle state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TaskError;

/// Lifecycle status of a task.
///
/// State transitions:
/// - Open -> Done (via `mark_done`, idempotent)
///
/// The transition is monotonic: a done task is never reopened. "Deleting" a
/// task, if a caller ever wants it, is a status transition, not erasure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Done,
}

impl TaskStatus {
    pub fn parse(s: &str) -> Result<Self, TaskError> {
        match s {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            _ => Err(TaskError::Validation(format!(
                "invalid status '{s}': must be open or done"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
        }
    }

    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
