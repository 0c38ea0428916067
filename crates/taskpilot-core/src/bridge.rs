//! Calendar bridge: maps one task onto one remote calendar event, on
//! explicit request only.

use std::sync::Arc;

use tokio::time::timeout;
use tracing::info;

use crate::config::Config;
use crate::domain::{Task, TaskError, TaskId};
use crate::ports::{
    AccessToken, CalendarProvider, CalendarRef, CreatedEvent, CredentialProvider, EventRequest,
    TaskStore,
};

/// Translates tasks into provider events and records the back-reference.
///
/// The bridge owns no credential lifecycle: it asks `CredentialProvider`
/// for a currently-valid token and surfaces `Auth` failures without
/// retrying. Every external call runs under the configured timeout.
pub struct CalendarBridge {
    store: Arc<dyn TaskStore>,
    credentials: Arc<dyn CredentialProvider>,
    provider: Arc<dyn CalendarProvider>,
    config: Config,
}

impl CalendarBridge {
    pub fn new(
        store: Arc<dyn TaskStore>,
        credentials: Arc<dyn CredentialProvider>,
        provider: Arc<dyn CalendarProvider>,
        config: Config,
    ) -> Self {
        Self {
            store,
            credentials,
            provider,
            config,
        }
    }

    /// Mirror `task_id` onto the calendar and return the event link.
    ///
    /// Idempotent at the task level: re-running overwrites the stored link.
    /// NOT idempotent at the provider level: each call creates a new remote
    /// event; there is no de-duplication. If a due date was edited after an
    /// earlier sync, the earlier event is left stale and a fresh one is
    /// created.
    pub async fn sync(&self, task_id: TaskId) -> Result<String, TaskError> {
        let task = self.store.get(task_id).await?;
        let request = self.event_request(&task)?;
        let credential = self.credential().await?;

        let created = self
            .provider_call(self.provider.create_event(
                &credential,
                &self.config.calendar_id,
                request,
            ))
            .await?;

        let CreatedEvent {
            event_id,
            html_link,
        } = created;
        self.store
            .set_calendar_event(
                task_id,
                Some(CalendarRef {
                    event_id,
                    link: html_link.clone(),
                }),
            )
            .await?;

        info!(task = %task_id, link = %html_link, "calendar event created");
        Ok(html_link)
    }

    /// Delete the remote event linked to `task_id` and clear the stored
    /// reference. Fails with `Precondition` if no event is linked.
    pub async fn unlink(&self, task_id: TaskId) -> Result<(), TaskError> {
        let task = self.store.get(task_id).await?;
        let Some(event_id) = task.calendar_event_id else {
            return Err(TaskError::precondition(format!(
                "task {task_id} has no linked calendar event"
            )));
        };

        let credential = self.credential().await?;
        self.provider_call(self.provider.delete_event(
            &credential,
            &self.config.calendar_id,
            &event_id,
        ))
        .await?;

        self.store.set_calendar_event(task_id, None).await?;
        info!(task = %task_id, "calendar event removed");
        Ok(())
    }

    fn event_request(&self, task: &Task) -> Result<EventRequest, TaskError> {
        let Some(due_at) = task.due_at else {
            return Err(TaskError::precondition(format!(
                "task {} has no due date; set one before syncing",
                task.id
            )));
        };
        Ok(EventRequest {
            summary: task.title.clone(),
            // The task id is the stable cross-reference back to the store.
            description: task.id.to_string(),
            start: due_at,
            end: due_at + self.config.event_duration(),
        })
    }

    async fn credential(&self) -> Result<AccessToken, TaskError> {
        match timeout(
            self.config.external_timeout(),
            self.credentials.get_valid_credential(),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(TaskError::Auth("credential fetch timed out".into())),
        }
    }

    async fn provider_call<T>(
        &self,
        call: impl Future<Output = Result<T, TaskError>>,
    ) -> Result<T, TaskError> {
        match timeout(self.config.external_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(TaskError::Provider("calendar call timed out".into())),
        }
    }
}
