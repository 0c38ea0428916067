//! Reminder scheduler: fires one notification per task whose due time has
//! passed, exactly once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::TaskFilter;
use crate::ports::{Clock, Notifier, TaskStore};

/// Periodic scan loop over the task store.
///
/// Each tick selects open tasks with `due_at <= now` and `reminded = false`,
/// notifies them in ascending (due_at, id) order, and durably sets the
/// sticky `reminded` flag per task. Delivery is at-least-once: a failed
/// notification leaves the flag false so the next tick retries; a set flag
/// is never re-fired, even if the due date is later edited into the past.
pub struct ReminderScheduler {
    store: Arc<dyn TaskStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

/// Handle to a spawned scheduler.
/// - `request_shutdown()` stops the loop after the in-flight task, if any.
/// - `shutdown_and_join()` additionally waits for the loop to exit.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already have exited
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

impl ReminderScheduler {
    pub fn new(
        store: Arc<dyn TaskStore>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            notifier,
            clock,
        }
    }

    /// Spawn the periodic loop. One scan per `interval` tick.
    pub fn spawn(self, interval: Duration) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                if *shutdown_rx.borrow() {
                    break;
                }

                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        // A closed channel means the handle is gone; treat
                        // it as a shutdown request rather than spinning on.
                        if changed.is_err() {
                            break;
                        }
                        continue;
                    }
                    _ = ticker.tick() => {}
                }

                if let Err(e) = self.scan_once(Some(&shutdown_rx)).await {
                    // A store failure aborts this scan only; per-task
                    // updates already applied stay applied.
                    warn!(error = %e, "reminder scan failed");
                }
            }
        });

        SchedulerHandle { shutdown_tx, join }
    }

    /// Run one scan. Public so tests (and one-shot callers) can drive the
    /// scheduler without a timer.
    ///
    /// Returns the number of reminders delivered this scan.
    pub async fn scan_once(
        &self,
        shutdown_rx: Option<&watch::Receiver<bool>>,
    ) -> Result<usize, crate::domain::TaskError> {
        let now = self.clock.now();

        let mut due: Vec<_> = self
            .store
            .list(TaskFilter::open())
            .await?
            .into_iter()
            .filter(|t| t.due_for_reminder(now))
            .collect();
        due.sort_by_key(|t| (t.due_at, t.id));

        let mut delivered = 0;
        for task in due {
            // Finish-or-skip: a shutdown request never interrupts the
            // notify/flag pair for the task in flight.
            if shutdown_rx.is_some_and(|rx| *rx.borrow()) {
                break;
            }

            match self.notifier.notify(&task).await {
                Ok(()) => {
                    self.store.mark_reminded(task.id).await?;
                    delivered += 1;
                    debug!(task = %task.id, "reminder delivered");
                }
                Err(e) => {
                    // Leave the flag false; the next tick retries.
                    warn!(task = %task.id, error = %e, "reminder delivery failed, will retry");
                }
            }
        }
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, TaskId};
    use crate::ports::{FixedClock, NotifyError};
    use crate::store::JsonTaskStore;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Records notified task ids; optionally fails every call.
    #[derive(Default)]
    struct RecordingNotifier {
        notified: Mutex<Vec<TaskId>>,
        failing: AtomicBool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, task: &crate::domain::Task) -> Result<(), NotifyError> {
            if self.failing.load(Ordering::Relaxed) {
                return Err(NotifyError("chat unreachable".into()));
            }
            self.notified.lock().unwrap().push(task.id);
            Ok(())
        }
    }

    fn scheduler_at(
        now: chrono::DateTime<Utc>,
    ) -> (
        Arc<JsonTaskStore>,
        Arc<RecordingNotifier>,
        Arc<FixedClock>,
        ReminderScheduler,
    ) {
        let store = Arc::new(JsonTaskStore::in_memory());
        let notifier = Arc::new(RecordingNotifier::default());
        let clock = Arc::new(FixedClock::at(now));
        let scheduler = ReminderScheduler::new(
            Arc::clone(&store) as Arc<dyn TaskStore>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        (store, notifier, clock, scheduler)
    }

    #[tokio::test]
    async fn past_due_task_is_reminded_exactly_once() {
        let due = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let tick1 = Utc.with_ymd_and_hms(2025, 1, 25, 15, 1, 0).unwrap();
        let (store, notifier, clock, scheduler) = scheduler_at(tick1);

        let task = store
            .create(NewTask::new("pay rent").with_due_at(due))
            .await
            .unwrap();

        assert_eq!(scheduler.scan_once(None).await.unwrap(), 1);
        assert!(store.get(task.id).await.unwrap().reminded);

        // Second tick a minute later selects nothing.
        clock.set(Utc.with_ymd_and_hms(2025, 1, 25, 15, 2, 0).unwrap());
        assert_eq!(scheduler.scan_once(None).await.unwrap(), 0);
        assert_eq!(notifier.notified.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn undated_and_future_tasks_are_never_selected() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, notifier, _clock, scheduler) = scheduler_at(now);

        store.create(NewTask::new("no deadline")).await.unwrap();
        store
            .create(NewTask::new("later").with_due_at(now + ChronoDuration::hours(2)))
            .await
            .unwrap();

        assert_eq!(scheduler.scan_once(None).await.unwrap(), 0);
        assert!(notifier.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn due_order_then_id_breaks_ties() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, notifier, _clock, scheduler) = scheduler_at(now);

        let later = store
            .create(NewTask::new("b").with_due_at(now - ChronoDuration::minutes(5)))
            .await
            .unwrap();
        let earlier = store
            .create(NewTask::new("a").with_due_at(now - ChronoDuration::minutes(30)))
            .await
            .unwrap();
        let tie = store
            .create(NewTask::new("c").with_due_at(now - ChronoDuration::minutes(5)))
            .await
            .unwrap();

        scheduler.scan_once(None).await.unwrap();

        let order = notifier.notified.lock().unwrap().clone();
        assert_eq!(order, vec![earlier.id, later.id, tie.id]);
    }

    #[tokio::test]
    async fn failed_delivery_is_retried_next_scan() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, notifier, _clock, scheduler) = scheduler_at(now);

        let task = store
            .create(NewTask::new("flaky").with_due_at(now - ChronoDuration::minutes(1)))
            .await
            .unwrap();

        notifier.failing.store(true, Ordering::Relaxed);
        assert_eq!(scheduler.scan_once(None).await.unwrap(), 0);
        assert!(!store.get(task.id).await.unwrap().reminded);

        notifier.failing.store(false, Ordering::Relaxed);
        assert_eq!(scheduler.scan_once(None).await.unwrap(), 1);
        assert!(store.get(task.id).await.unwrap().reminded);
    }

    #[tokio::test]
    async fn completed_tasks_are_not_reminded() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, notifier, _clock, scheduler) = scheduler_at(now);

        let task = store
            .create(NewTask::new("done already").with_due_at(now - ChronoDuration::minutes(1)))
            .await
            .unwrap();
        store.mark_done(task.id).await.unwrap();

        assert_eq!(scheduler.scan_once(None).await.unwrap(), 0);
        assert!(notifier.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dropping_the_handle_stops_the_loop() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, notifier, _clock, scheduler) = scheduler_at(now);

        let handle = scheduler.spawn(Duration::from_millis(10));
        drop(handle);
        tokio::time::sleep(Duration::from_millis(30)).await;

        // A task that becomes due after the drop must never fire: the loop
        // has to exit when its shutdown channel closes, not keep scanning.
        let task = store
            .create(NewTask::new("orphaned").with_due_at(now - ChronoDuration::minutes(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!store.get(task.id).await.unwrap().reminded);
        assert!(notifier.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn spawned_loop_shuts_down_cleanly() {
        let now = Utc.with_ymd_and_hms(2025, 1, 25, 15, 0, 0).unwrap();
        let (store, _notifier, _clock, scheduler) = scheduler_at(now);

        store
            .create(NewTask::new("due").with_due_at(now - ChronoDuration::minutes(1)))
            .await
            .unwrap();

        let handle = scheduler.spawn(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown_and_join().await;

        let open = store.list(TaskFilter::open()).await.unwrap();
        assert!(open[0].reminded);
    }
}
