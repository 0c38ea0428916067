//! taskpilot-core
//!
//! Task & reminder core for a personal task-assistant bot.
//!
//! # Module layout
//! - **domain**: task records, ids, status, priorities, errors, due parsing
//! - **ports**: the seams to external collaborators (store persistence,
//!   reminder delivery, credentials, the calendar provider, the clock)
//! - **store**: the shipped JSON-file `TaskStore`
//! - **scheduler**: the periodic reminder loop
//! - **bridge**: task -> calendar event mapping
//! - **app**: builder + the 1:1 command surface
//! - **impls**: development implementations of the ports

pub mod app;
pub mod bridge;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod scheduler;
pub mod store;

pub use app::{App, AppBuilder, BuildError};
pub use bridge::CalendarBridge;
pub use config::Config;
pub use domain::{NewTask, Priority, Task, TaskError, TaskFilter, TaskId, TaskPatch, TaskStatus};
pub use scheduler::{ReminderScheduler, SchedulerHandle};
pub use store::JsonTaskStore;
