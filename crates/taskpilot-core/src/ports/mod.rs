//! Ports - the seams to everything outside the core.
//!
//! Each trait hides an external collaborator: the durable store, the chat
//! side that delivers reminders, the OAuth machinery that owns credentials,
//! and the calendar provider's HTTP surface. The core only ever talks
//! through these.

pub mod calendar;
pub mod clock;
pub mod credentials;
pub mod notifier;
pub mod task_store;

pub use self::calendar::{CalendarProvider, CreatedEvent, EventRequest};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::credentials::{AccessToken, CredentialProvider};
pub use self::notifier::{Notifier, NotifyError};
pub use self::task_store::{CalendarRef, TaskStore};
