//! Calendar events attended during the reporting period.
//!
//! [`format_events`] parses an iCalendar file, keeps the events that fall
//! inside a [`DateRange`](crate::github::DateRange) and that the user
//! attended, and renders each one as a short text block for the prompt.
//! [`CalendarCache`] remembers the rendered blocks between runs.

pub mod cache;
pub mod event;
pub mod format;
pub mod timezone;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{CalendarCache, load_calendar_events};
pub use event::{Attendee, CalendarEvent, parse_attended_events, parse_events};
pub use format::{EVENT_SEPARATOR, format_duration, format_events};
