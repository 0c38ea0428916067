//! App facade: wiring plus the 1:1 command surface the chat router calls.

use std::sync::Arc;

use crate::bridge::CalendarBridge;
use crate::config::Config;
use crate::domain::{
    parse_due_at, NewTask, Priority, Task, TaskError, TaskFilter, TaskId, TaskPatch,
};
use crate::ports::{CalendarProvider, Clock, CredentialProvider, Notifier, SystemClock, TaskStore};
use crate::scheduler::{ReminderScheduler, SchedulerHandle};

/// Missing wiring is caught at build time, not first use.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing component: {0}. Wire it on the builder before build().")]
    MissingComponent(&'static str),
}

/// Builds an [`App`] from its ports.
///
/// The store, notifier, credential provider and calendar provider are
/// required; the clock defaults to `SystemClock` and the config to its
/// defaults.
#[derive(Default)]
pub struct AppBuilder {
    store: Option<Arc<dyn TaskStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    calendar: Option<Arc<dyn CalendarProvider>>,
    clock: Option<Arc<dyn Clock>>,
    config: Option<Config>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn TaskStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn calendar(mut self, calendar: Arc<dyn CalendarProvider>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let store = self
            .store
            .ok_or(BuildError::MissingComponent("task store"))?;
        let notifier = self
            .notifier
            .ok_or(BuildError::MissingComponent("notifier"))?;
        let credentials = self
            .credentials
            .ok_or(BuildError::MissingComponent("credential provider"))?;
        let calendar = self
            .calendar
            .ok_or(BuildError::MissingComponent("calendar provider"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let config = self.config.unwrap_or_default();

        let bridge = CalendarBridge::new(
            Arc::clone(&store),
            credentials,
            calendar,
            config.clone(),
        );

        Ok(App {
            store,
            notifier,
            clock,
            bridge,
            config,
        })
    }
}

/// The assembled core. Each method maps 1:1 to a chat command.
pub struct App {
    store: Arc<dyn TaskStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    bridge: CalendarBridge,
    config: Config,
}

impl App {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// `/add <text>`
    pub async fn add_task(&self, new: NewTask) -> Result<Task, TaskError> {
        self.store.create(new).await
    }

    /// `/list`
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskError> {
        self.store.list(filter).await
    }

    /// `/due <id> <YYYY-MM-DD [HH:MM]>`
    pub async fn set_due(&self, id: TaskId, input: &str) -> Result<Task, TaskError> {
        let due_at = parse_due_at(input)?;
        self.store
            .update(
                id,
                TaskPatch {
                    due_at: Some(due_at),
                    ..TaskPatch::default()
                },
            )
            .await
    }

    /// `/setpriority <id> <low|normal|high>`
    pub async fn set_priority(&self, id: TaskId, priority: Priority) -> Result<Task, TaskError> {
        self.store
            .update(
                id,
                TaskPatch {
                    priority: Some(priority),
                    ..TaskPatch::default()
                },
            )
            .await
    }

    /// `/done <id>`
    pub async fn complete(&self, id: TaskId) -> Result<Task, TaskError> {
        self.store.mark_done(id).await
    }

    /// `/calendar_add <id>`: returns the event link.
    pub async fn sync_calendar(&self, id: TaskId) -> Result<String, TaskError> {
        self.bridge.sync(id).await
    }

    /// `/calendar_delete <id>`
    pub async fn unlink_calendar(&self, id: TaskId) -> Result<(), TaskError> {
        self.bridge.unlink(id).await
    }

    /// Start the reminder loop at the configured scan interval.
    pub fn spawn_scheduler(&self) -> SchedulerHandle {
        ReminderScheduler::new(
            Arc::clone(&self.store),
            Arc::clone(&self.notifier),
            Arc::clone(&self.clock),
        )
        .spawn(self.config.scan_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{FakeCalendar, StaticCredentials, TracingNotifier};
    use crate::store::JsonTaskStore;

    fn full_builder() -> AppBuilder {
        App::builder()
            .store(Arc::new(JsonTaskStore::in_memory()))
            .notifier(Arc::new(TracingNotifier))
            .credentials(Arc::new(StaticCredentials::valid("tok")))
            .calendar(Arc::new(FakeCalendar::new()))
    }

    #[test]
    fn build_fails_fast_on_missing_component() {
        let err = App::builder()
            .notifier(Arc::new(TracingNotifier))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, BuildError::MissingComponent("task store")));
    }

    #[test]
    fn build_succeeds_with_all_components() {
        assert!(full_builder().build().is_ok());
    }

    #[tokio::test]
    async fn command_surface_round_trip() {
        let app = full_builder().build().unwrap();

        let task = app.add_task(NewTask::new("Pay rent")).await.unwrap();
        app.set_priority(task.id, Priority::High).await.unwrap();
        app.set_due(task.id, "2025-01-25 15:00").await.unwrap();

        let link = app.sync_calendar(task.id).await.unwrap();
        assert!(link.starts_with("https://"));

        app.complete(task.id).await.unwrap();
        let open = app.list_tasks(TaskFilter::open()).await.unwrap();
        assert!(open.is_empty());
    }

    #[tokio::test]
    async fn set_due_rejects_garbage() {
        let app = full_builder().build().unwrap();
        let task = app.add_task(NewTask::new("x")).await.unwrap();

        let err = app.set_due(task.id, "next tuesday").await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }
}
