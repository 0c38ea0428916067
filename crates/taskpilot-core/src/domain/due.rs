//! Due-date parsing for the command surface.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::errors::TaskError;

/// Default time of day for date-only input.
const DEFAULT_DUE_TIME: (u32, u32) = (9, 0);

/// Parse a due date from user input.
///
/// Accepted forms:
/// - `YYYY-MM-DD` (time defaults to 09:00)
/// - `YYYY-MM-DD HH:MM`
///
/// Anything else is a `Validation` error. Input is interpreted as UTC; the
/// bot's timezone handling lives with the command router, not here.
pub fn parse_due_at(input: &str) -> Result<DateTime<Utc>, TaskError> {
    let input = input.trim();

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        dt
    } else if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let (h, m) = DEFAULT_DUE_TIME;
        date.and_time(NaiveTime::from_hms_opt(h, m, 0).expect("valid default time"))
    } else {
        return Err(TaskError::Validation(format!(
            "invalid due date '{input}': use YYYY-MM-DD or YYYY-MM-DD HH:MM"
        )));
    };

    Ok(naive.and_utc())
}
