//! Notifier port - reminder delivery.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Task;

/// Delivery failed; the scheduler leaves the task unreminded and retries on
/// the next tick.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivers one reminder for a task.
///
/// The real implementation is the chat side (a Telegram send), which lives
/// outside this crate. The scheduler only relies on the Ok/Err outcome:
/// Ok marks the task reminded, Err means retry next scan. Delivery is
/// at-least-once, never silently dropped.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, task: &Task) -> Result<(), NotifyError>;
}
