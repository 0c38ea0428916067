//! Notifier that logs reminders instead of sending them anywhere.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Task;
use crate::ports::{Notifier, NotifyError};

/// Emits each reminder as a log line. Used by the demo binary; the real bot
/// replaces this with a chat send.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, task: &Task) -> Result<(), NotifyError> {
        info!(task = %task.id, title = %task.title, "reminder: task is due");
        Ok(())
    }
}
