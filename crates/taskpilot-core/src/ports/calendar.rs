//! Calendar provider port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::credentials::AccessToken;
use crate::domain::TaskError;

/// One timed event to create on the remote calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// What the provider returns for a created event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub event_id: String,
    pub html_link: String,
}

/// Remote calendar operations.
///
/// Implementations wrap the HTTP plumbing to the real provider (the source
/// system talks to Google Calendar v3). Failures map to `Provider`; the
/// bridge applies a bounded timeout around every call.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn create_event(
        &self,
        credential: &AccessToken,
        calendar_id: &str,
        request: EventRequest,
    ) -> Result<CreatedEvent, TaskError>;

    async fn delete_event(
        &self,
        credential: &AccessToken,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<(), TaskError>;
}
