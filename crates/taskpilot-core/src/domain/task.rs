//! Task record and the value types that travel with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TaskError;
use super::state::TaskStatus;

/// Strongly-typed task identifier.
///
/// Ids are small integers assigned monotonically by the store (max existing
/// id + 1, starting at 1). They are never reused, even across a restart.
#[repr(transparent)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered task priority. `Normal` is the default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn parse(s: &str) -> Result<Self, TaskError> {
        match s {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            _ => Err(TaskError::Validation(format!(
                "invalid priority '{s}': must be low, normal, or high"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task record as held by the store and persisted to disk.
///
/// Field invariants:
/// - `title` is non-empty (enforced at create/update).
/// - `reminded` only ever goes false -> true, exactly once.
/// - `calendar_event_link` is written only by the calendar bridge; a re-sync
///   overwrites it with the newest link.
/// - No `due_at` means: never reminded, never calendar-eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub due_at: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    pub reminded: bool,
    pub calendar_event_link: Option<String>,
    /// Remote event id, kept alongside the link so the event can be deleted.
    pub calendar_event_id: Option<String>,
}

impl Task {
    /// Is this task eligible for a reminder at `now`?
    pub fn due_for_reminder(&self, now: DateTime<Utc>) -> bool {
        self.status == TaskStatus::Open
            && !self.reminded
            && self.due_at.is_some_and(|due| due <= now)
    }

    /// One-line human rendering, e.g. `[ ] #3 water plants (high) due 2025-01-25 15:00`.
    pub fn summary_line(&self) -> String {
        let mark = match self.status {
            TaskStatus::Open => "[ ]",
            TaskStatus::Done => "[x]",
        };
        let mut line = format!("{mark} {} {} ({})", self.id, self.title, self.priority);
        if let Some(due) = self.due_at {
            line.push_str(&format!(" due {}", due.format("%Y-%m-%d %H:%M")));
        }
        line
    }
}

/// Input for `TaskStore::create`.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub due_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::default(),
            due_at: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_at(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }
}

/// Partial patch for `TaskStore::update`.
///
/// `None` fields are left untouched. A due date can be set but not cleared
/// through a patch; the reminded flag and calendar link have dedicated store
/// methods so their invariants cannot be bypassed here.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub due_at: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.priority.is_none()
            && self.due_at.is_none()
            && self.status.is_none()
    }
}

/// Filter for `TaskStore::list`. Empty filter matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn open() -> Self {
        Self {
            status: Some(TaskStatus::Open),
            ..Self::default()
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|s| task.status == s)
            && self.priority.is_none_or(|p| task.priority == p)
    }
}
