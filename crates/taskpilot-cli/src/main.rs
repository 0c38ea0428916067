//! Scripted end-to-end demo of the task core.
//!
//! Wires the JSON store with the dev implementations, adds a few tasks,
//! lets the reminder loop fire, mirrors one task onto the fake calendar,
//! and shuts down cleanly.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use taskpilot_core::impls::{FakeCalendar, StaticCredentials, TracingNotifier};
use taskpilot_core::{App, Config, JsonTaskStore, NewTask, Priority, TaskFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // (A) Wire the core: JSON store on disk, dev ports for everything else.
    let store = Arc::new(JsonTaskStore::open("taskpilot.json").await?);
    let app = App::builder()
        .store(store)
        .notifier(Arc::new(TracingNotifier))
        .credentials(Arc::new(StaticCredentials::valid("demo-token")))
        .calendar(Arc::new(FakeCalendar::new()))
        .config(Config {
            scan_interval_secs: 1,
            ..Config::default()
        })
        .build()?;

    // (B) Create tasks: one already overdue, one with a future deadline.
    let overdue = app
        .add_task(
            NewTask::new("Pay rent")
                .with_priority(Priority::High)
                .with_due_at(Utc::now() - chrono::Duration::minutes(5)),
        )
        .await?;
    let upcoming = app
        .add_task(NewTask::new("Book dentist").with_due_at(Utc::now() + chrono::Duration::days(1)))
        .await?;
    println!("created {} and {}", overdue.id, upcoming.id);

    // (C) Start the reminder loop; the overdue task fires on the first scan.
    let scheduler = app.spawn_scheduler();
    sleep(Duration::from_millis(1500)).await;

    // (D) Mirror the upcoming task onto the calendar.
    let link = app.sync_calendar(upcoming.id).await?;
    println!("calendar event: {link}");

    app.complete(overdue.id).await?;

    for task in app.list_tasks(TaskFilter::all()).await? {
        println!("{}", task.summary_line());
    }

    // (E) Graceful stop: finish the in-flight task, skip the rest.
    scheduler.shutdown_and_join().await;
    Ok(())
}
