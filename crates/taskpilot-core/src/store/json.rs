//! File-backed task store.
//!
//! One JSON document holds every task, keyed by id. Each mutation is
//! committed to disk (write temp file, rename) before the in-memory map is
//! touched and the call returns, so a rejected write leaves both views
//! unchanged and a crash after commit only ever means the caller retries an
//! already-applied mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{NewTask, Task, TaskError, TaskFilter, TaskId, TaskPatch, TaskStatus};
use crate::ports::{CalendarRef, TaskStore};

/// On-disk snapshot format. Exactly the fields of `Task`, round-tripped.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    tasks: Vec<Task>,
}

struct StoreState {
    /// All task records in id order (BTreeMap gives insertion == id order).
    tasks: BTreeMap<TaskId, Task>,

    /// Next id to assign. Initialized to max existing + 1; ids are never
    /// reused because records are never physically deleted.
    next_id: TaskId,

    /// Snapshot path; `None` means memory-only (tests, demos).
    path: Option<PathBuf>,
}

impl StoreState {
    fn new(tasks: BTreeMap<TaskId, Task>, path: Option<PathBuf>) -> Self {
        let next_id = tasks
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(TaskId::new(1));
        Self {
            tasks,
            next_id,
            path,
        }
    }

    /// Serialize the current map with `proposed` substituted (or appended,
    /// for a new id). The caller installs `proposed` only after the commit
    /// succeeds.
    fn snapshot_with(&self, proposed: &Task) -> Snapshot {
        let mut tasks: Vec<Task> = Vec::with_capacity(self.tasks.len() + 1);
        let mut replaced = false;
        for task in self.tasks.values() {
            if task.id == proposed.id {
                tasks.push(proposed.clone());
                replaced = true;
            } else {
                tasks.push(task.clone());
            }
        }
        if !replaced {
            // New ids are always larger than existing ones, so appending
            // keeps the snapshot in id order.
            tasks.push(proposed.clone());
        }
        Snapshot { tasks }
    }
}

/// The shipped `TaskStore`: an in-memory map with a durable JSON snapshot.
///
/// A single async mutex serializes every read-modify-write, which subsumes
/// the per-record serialization the contract asks for.
pub struct JsonTaskStore {
    state: Mutex<StoreState>,
}

impl JsonTaskStore {
    /// Open (or create) a store backed by the file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TaskError> {
        let path = path.as_ref().to_path_buf();
        let tasks = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes).map_err(|e| {
                    TaskError::Persistence(format!("corrupt snapshot {}: {e}", path.display()))
                })?;
                snapshot.tasks.into_iter().map(|t| (t.id, t)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(TaskError::Persistence(format!(
                    "cannot read {}: {e}",
                    path.display()
                )));
            }
        };
        Ok(Self {
            state: Mutex::new(StoreState::new(tasks, Some(path))),
        })
    }

    /// Memory-only store; nothing touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(StoreState::new(BTreeMap::new(), None)),
        }
    }

    /// Commit `proposed` durably, then install it in the map.
    ///
    /// Ordering matters: the write happens first so a persistence failure
    /// rejects the operation without partial application.
    async fn commit(state: &mut StoreState, proposed: Task) -> Result<Task, TaskError> {
        if let Some(path) = state.path.clone() {
            let snapshot = state.snapshot_with(&proposed);
            let bytes = serde_json::to_vec_pretty(&snapshot)
                .map_err(|e| TaskError::Persistence(format!("serialize snapshot: {e}")))?;

            let tmp = path.with_extension("json.tmp");
            tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
                TaskError::Persistence(format!("write {}: {e}", tmp.display()))
            })?;
            tokio::fs::rename(&tmp, &path).await.map_err(|e| {
                TaskError::Persistence(format!("rename into {}: {e}", path.display()))
            })?;
        }

        if proposed.id >= state.next_id {
            state.next_id = proposed.id.next();
        }
        state.tasks.insert(proposed.id, proposed.clone());
        Ok(proposed)
    }

    fn validated_title(title: &str) -> Result<String, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::validation("task title must not be empty"));
        }
        Ok(title.to_string())
    }
}

#[async_trait]
impl TaskStore for JsonTaskStore {
    async fn create(&self, new: NewTask) -> Result<Task, TaskError> {
        let title = Self::validated_title(&new.title)?;

        let mut state = self.state.lock().await;
        let task = Task {
            id: state.next_id,
            title,
            priority: new.priority,
            due_at: new.due_at,
            status: TaskStatus::Open,
            reminded: false,
            calendar_event_link: None,
            calendar_event_id: None,
        };
        Self::commit(&mut state, task).await
    }

    async fn get(&self, id: TaskId) -> Result<Task, TaskError> {
        let state = self.state.lock().await;
        state.tasks.get(&id).cloned().ok_or(TaskError::NotFound(id))
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, TaskError> {
        let mut state = self.state.lock().await;
        let mut task = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskError::NotFound(id))?;

        if patch.is_empty() {
            return Ok(task);
        }

        if let Some(title) = &patch.title {
            task.title = Self::validated_title(title)?;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_at) = patch.due_at {
            task.due_at = Some(due_at);
        }
        if let Some(status) = patch.status {
            if task.status == TaskStatus::Done && status == TaskStatus::Open {
                return Err(TaskError::validation(
                    "status transition is monotonic: a done task cannot be reopened",
                ));
            }
            task.status = status;
        }

        Self::commit(&mut state, task).await
    }

    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        let state = self.state.lock().await;
        Ok(state
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn mark_done(&self, id: TaskId) -> Result<Task, TaskError> {
        let mut state = self.state.lock().await;
        let mut task = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskError::NotFound(id))?;

        // Idempotent: no write, no error.
        if task.status == TaskStatus::Done {
            return Ok(task);
        }

        task.status = TaskStatus::Done;
        Self::commit(&mut state, task).await
    }

    async fn mark_reminded(&self, id: TaskId) -> Result<Task, TaskError> {
        let mut state = self.state.lock().await;
        let mut task = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskError::NotFound(id))?;

        // Sticky flag: false -> true exactly once.
        if task.reminded {
            return Ok(task);
        }

        task.reminded = true;
        Self::commit(&mut state, task).await
    }

    async fn set_calendar_event(
        &self,
        id: TaskId,
        event: Option<CalendarRef>,
    ) -> Result<Task, TaskError> {
        let mut state = self.state.lock().await;
        let mut task = state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskError::NotFound(id))?;

        match event {
            Some(event) => {
                task.calendar_event_id = Some(event.event_id);
                task.calendar_event_link = Some(event.link);
            }
            None => {
                task.calendar_event_id = None;
                task.calendar_event_link = None;
            }
        }
        Self::commit(&mut state, task).await
    }
}
