//! Rendering of attended calendar events as prompt text.

use chrono::TimeDelta;
use regex::Regex;
use tracing::debug;

use crate::error::DigestError;
use crate::github::DateRange;

use super::event::{CalendarEvent, parse_attended_events};

/// Line closing every rendered event.
pub const EVENT_SEPARATOR: &str = "-------------------";

/// Block that video-call integrations append to event descriptions, fenced
/// by `-::~:~::~...::~:~::-` rulers.
const CONFERENCE_BOILERPLATE: &str = r"(?s)-::~:~::~[:~]*::-.*-::~:~::~[:~]*::-";

/// Formats the events in `ics_text` that lie within `range` and that `email`
/// attended.
///
/// An event is kept when it starts no earlier than the lower bound, ends no
/// later than the upper bound, and lists `email` as an attendee who neither
/// declined nor left the invitation unanswered. Events keep file order.
/// Unreadable events that `email` did not attend are skipped.
///
/// # Errors
///
/// Returns [`DigestError::Calendar`] when the calendar cannot be parsed or an
/// attended event is unreadable.
pub fn format_events(
    ics_text: &str,
    range: &DateRange,
    email: &str,
) -> Result<Vec<String>, DigestError> {
    let boilerplate = conference_boilerplate()?;
    let events = parse_attended_events(ics_text, email)?;
    let attended = events.len();

    let rendered: Vec<String> = events
        .iter()
        .filter(|event| event.start >= range.lower() && event.end <= range.upper())
        .map(|event| render_event(event, &boilerplate))
        .collect();

    debug!(attended, kept = rendered.len(), "filtered calendar events");
    Ok(rendered)
}

fn conference_boilerplate() -> Result<Regex, DigestError> {
    Regex::new(CONFERENCE_BOILERPLATE).map_err(|error| DigestError::Calendar {
        message: format!("invalid description filter: {error}"),
    })
}

fn render_event(event: &CalendarEvent, boilerplate: &Regex) -> String {
    let mut lines = vec![
        event
            .summary
            .clone()
            .unwrap_or_else(|| "(untitled event)".to_owned()),
        format!("duration: {}", format_duration(event.duration())),
    ];

    if let Some(description) = event.description.as_deref() {
        let cleaned = boilerplate.replace_all(description, "");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            lines.push(format!("description: {trimmed}"));
        }
    }

    if !event.attendees.is_empty() {
        lines.push("attendees:".to_owned());
    }
    lines.extend(
        event
            .attendees
            .iter()
            .map(|attendee| format!("  - {}", attendee.display_name())),
    );

    lines.push(EVENT_SEPARATOR.to_owned());
    lines.join("\n")
}

/// Renders a duration as `H:MM:SS`, prefixed with `N day(s), ` when it spans
/// at least a day.
#[must_use]
pub fn format_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let magnitude = total.unsigned_abs();

    let days = magnitude.div_euclid(86_400);
    let within_day = magnitude.rem_euclid(86_400);
    let hours = within_day.div_euclid(3_600);
    let minutes = within_day.rem_euclid(3_600).div_euclid(60);
    let seconds = within_day.rem_euclid(60);

    let clock = format!("{hours}:{minutes:02}:{seconds:02}");
    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        _ => format!("{sign}{days} days, {clock}"),
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
