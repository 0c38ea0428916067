//! Development implementations of the ports.
//!
//! These stand in for the real collaborators (Telegram delivery, the OAuth
//! token cache, the Google Calendar HTTP client) in tests and the demo
//! binary. Production wires its own implementations.

mod fake_calendar;
mod static_credentials;
mod tracing_notifier;

pub use fake_calendar::FakeCalendar;
pub use static_credentials::StaticCredentials;
pub use tracing_notifier::TracingNotifier;
