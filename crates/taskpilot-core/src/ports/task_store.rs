//! TaskStore port - the durable keyed collection of task records.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskError, TaskFilter, TaskId, TaskPatch};

/// Source of truth for task records.
///
/// Design:
/// - Every mutating call commits durably before returning success; a crash
///   between commit and response never loses data but may cause the caller
///   to retry an already-applied mutation (upstream must tolerate
///   at-least-once).
/// - Read-modify-write sequences are serialized per record; implementations
///   may use a single lock since the store is process-wide, single-writer.
/// - The `reminded` flag and calendar link have dedicated methods so their
///   invariants (sticky flag, bridge-only link) cannot be bypassed through
///   a general patch.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create a task. Fails with `Validation` if the title is empty.
    /// The assigned id is max existing id + 1, or 1 for an empty store.
    async fn create(&self, new: NewTask) -> Result<Task, TaskError>;

    /// Fetch one task. Fails with `NotFound`.
    async fn get(&self, id: TaskId) -> Result<Task, TaskError>;

    /// Apply a partial patch. Fails with `NotFound` or `Validation`
    /// (empty title, reopening a done task).
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskError>;

    /// List tasks in insertion (= id) order. Read-only.
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// Mark a task done. Idempotent: already-done is a no-op success.
    async fn mark_done(&self, id: TaskId) -> Result<Task, TaskError>;

    /// Set the sticky `reminded` flag. Idempotent; never cleared.
    async fn mark_reminded(&self, id: TaskId) -> Result<Task, TaskError>;

    /// Record (or clear) the calendar event reference for a task.
    /// Called by the calendar bridge after a provider round-trip.
    async fn set_calendar_event(
        &self,
        id: TaskId,
        event: Option<CalendarRef>,
    ) -> Result<Task, TaskError>;
}

/// Back-reference to a remote calendar event, stored on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRef {
    pub event_id: String,
    pub link: String,
}
