//! In-process calendar provider for tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::TaskError;
use crate::ports::{AccessToken, CalendarProvider, CreatedEvent, EventRequest};

/// Records every request and mints sequential event ids/links.
///
/// Like the real provider, it happily creates duplicate events for the same
/// task; the bridge's non-idempotence tests rely on that.
pub struct FakeCalendar {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    created: Vec<EventRequest>,
    deleted: Vec<String>,
    next_event: u64,
    fail_next: Option<String>,
}

impl FakeCalendar {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_event: 1,
                ..Inner::default()
            }),
        }
    }

    /// Make the next call fail with a `Provider` error.
    pub fn fail_next(&self, reason: impl Into<String>) {
        self.inner.lock().unwrap().fail_next = Some(reason.into());
    }

    /// Every create request seen so far, in order.
    pub fn created(&self) -> Vec<EventRequest> {
        self.inner.lock().unwrap().created.clone()
    }

    /// Every deleted event id, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.inner.lock().unwrap().deleted.clone()
    }
}

impl Default for FakeCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalendarProvider for FakeCalendar {
    async fn create_event(
        &self,
        _credential: &AccessToken,
        _calendar_id: &str,
        request: EventRequest,
    ) -> Result<CreatedEvent, TaskError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = inner.fail_next.take() {
            return Err(TaskError::Provider(reason));
        }

        let n = inner.next_event;
        inner.next_event += 1;
        inner.created.push(request);

        Ok(CreatedEvent {
            event_id: format!("evt-{n}"),
            html_link: format!("https://calendar.example/event/evt-{n}"),
        })
    }

    async fn delete_event(
        &self,
        _credential: &AccessToken,
        _calendar_id: &str,
        event_id: &str,
    ) -> Result<(), TaskError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = inner.fail_next.take() {
            return Err(TaskError::Provider(reason));
        }
        inner.deleted.push(event_id.to_string());
        Ok(())
    }
}
