//! Extraction of `VEVENT` components from iCalendar text.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::parser::{Component, Property, read_calendar, unfold};
use tracing::warn;

use super::timezone::ZoneTable;
use crate::error::DigestError;

const DATE_FORMAT: &str = "%Y%m%d";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const MAILTO: &str = "mailto:";

/// Participation status values that mean the user did not attend.
const ABSENT_STATUSES: [&str; 2] = ["DECLINED", "NEEDS-ACTION"];

/// One invitee of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// Address with any `mailto:` scheme removed.
    pub address: String,
    /// Display name from the `CN` parameter.
    pub common_name: Option<String>,
    /// Value of the `PARTSTAT` parameter, upper-cased.
    pub participation: Option<String>,
}

impl Attendee {
    /// Whether this attendee is `email` and did not decline or ignore the
    /// invitation.
    #[must_use]
    pub fn attended_as(&self, email: &str) -> bool {
        self.address.eq_ignore_ascii_case(email.trim())
            && !self
                .participation
                .as_deref()
                .is_some_and(|status| ABSENT_STATUSES.contains(&status))
    }

    /// Name shown in the digest, falling back to the address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.common_name.as_deref().unwrap_or(&self.address)
    }
}

/// A calendar event reduced to the fields the digest needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title.
    pub summary: Option<String>,
    /// Free-text description with escapes decoded.
    pub description: Option<String>,
    /// Start instant in UTC.
    pub start: DateTime<Utc>,
    /// End instant in UTC.
    pub end: DateTime<Utc>,
    /// Invitees in file order.
    pub attendees: Vec<Attendee>,
}

impl CalendarEvent {
    /// Length of the event.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    fn from_component(component: &Component<'_>, zones: &ZoneTable) -> Result<Self, DigestError> {
        let start_property = find_property(component, "DTSTART").ok_or_else(|| {
            DigestError::Calendar {
                message: format!(
                    "event '{}' has no DTSTART",
                    text_value(component, "UID").unwrap_or_default()
                ),
            }
        })?;
        let start = EventTime::parse(start_property, zones)?;

        let end = resolve_end(component, start, zones)?;

        Ok(Self {
            summary: text_value(component, "SUMMARY"),
            description: text_value(component, "DESCRIPTION"),
            start: start.instant(),
            end,
            attendees: attendees(component),
        })
    }
}

/// `DTEND`, else `DTSTART + DURATION`, else one day for all-day events, else
/// the start itself.
fn resolve_end(
    component: &Component<'_>,
    start: EventTime,
    zones: &ZoneTable,
) -> Result<DateTime<Utc>, DigestError> {
    match (
        find_property(component, "DTEND"),
        find_property(component, "DURATION"),
        start,
    ) {
        (Some(property), _, _) => Ok(EventTime::parse(property, zones)?.instant()),
        (None, Some(property), _) => Ok(start.instant() + parse_duration(property.val.as_str())?),
        (None, None, EventTime::Date(_)) => Ok(start.instant() + TimeDelta::days(1)),
        (None, None, EventTime::DateTime(instant)) => Ok(instant),
    }
}

/// Parses every `VEVENT` in `ics_text`, at any nesting depth, in file order.
///
/// `TZID` values resolve against the IANA database first, then against the
/// calendar's own `VTIMEZONE` blocks. A zone known to neither is read as UTC.
///
/// # Errors
///
/// Returns [`DigestError::Calendar`] when the text is not iCalendar or an
/// event carries an unreadable date or duration.
pub fn parse_events(ics_text: &str) -> Result<Vec<CalendarEvent>, DigestError> {
    let mut events = Vec::new();
    walk_events(ics_text, |component, zones| {
        events.push(CalendarEvent::from_component(component, zones)?);
        Ok(())
    })?;
    Ok(events)
}

/// Parses the events in `ics_text` that `email` attended, in file order.
///
/// An unreadable event is skipped with a warning unless `email` attended it.
///
/// # Errors
///
/// Returns [`DigestError::Calendar`] when the text is not iCalendar or an
/// attended event carries an unreadable date or duration.
pub fn parse_attended_events(
    ics_text: &str,
    email: &str,
) -> Result<Vec<CalendarEvent>, DigestError> {
    let mut events = Vec::new();
    walk_events(ics_text, |component, zones| {
        let attended = attendees(component)
            .iter()
            .any(|attendee| attendee.attended_as(email));
        match CalendarEvent::from_component(component, zones) {
            Ok(event) if attended => events.push(event),
            Ok(_) => {}
            Err(error) if attended => return Err(error),
            Err(error) => {
                warn!(
                    uid = %text_value(component, "UID").unwrap_or_default(),
                    %error,
                    "skipping unreadable event the user did not attend"
                );
            }
        }
        Ok(())
    })?;
    Ok(events)
}

fn walk_events<F>(ics_text: &str, mut visit: F) -> Result<(), DigestError>
where
    F: FnMut(&Component<'_>, &ZoneTable) -> Result<(), DigestError>,
{
    let unfolded = unfold(ics_text);
    let calendar = read_calendar(&unfolded).map_err(|error| DigestError::Calendar {
        message: format!("invalid iCalendar data: {error}"),
    })?;
    let zones = ZoneTable::from_components(&calendar.components);
    visit_events(&calendar.components, &zones, &mut visit)
}

fn visit_events<F>(
    components: &[Component<'_>],
    zones: &ZoneTable,
    visit: &mut F,
) -> Result<(), DigestError>
where
    F: FnMut(&Component<'_>, &ZoneTable) -> Result<(), DigestError>,
{
    for component in components {
        if component.name.as_str().eq_ignore_ascii_case("VEVENT") {
            visit(component, zones)?;
        }
        visit_events(&component.components, zones, visit)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum EventTime {
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl EventTime {
    fn parse(property: &Property<'_>, zones: &ZoneTable) -> Result<Self, DigestError> {
        let raw = property.val.as_str().trim();
        let is_date = parameter(property, "VALUE").is_some_and(|kind| kind.eq_ignore_ascii_case("DATE"))
            || !raw.contains('T');

        if is_date {
            return NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map(Self::Date)
                .map_err(|error| invalid_time(raw, &error));
        }

        if let Some(utc) = raw.strip_suffix('Z') {
            let naive = NaiveDateTime::parse_from_str(utc, DATE_TIME_FORMAT)
                .map_err(|error| invalid_time(raw, &error))?;
            return Ok(Self::DateTime(naive.and_utc()));
        }

        let naive = NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
            .map_err(|error| invalid_time(raw, &error))?;
        let Some(zone_name) = parameter(property, "TZID") else {
            return Ok(Self::DateTime(naive.and_utc()));
        };

        if let Ok(zone) = Tz::from_str(zone_name) {
            return zone
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| Self::DateTime(local.with_timezone(&Utc)))
                .ok_or_else(|| DigestError::Calendar {
                    message: format!("'{raw}' does not exist in time zone {zone_name}"),
                });
        }
        if let Some(instant) = zones.to_utc(zone_name, naive) {
            return Ok(Self::DateTime(instant));
        }

        warn!(zone = zone_name, time = raw, "unknown time zone, reading time as UTC");
        Ok(Self::DateTime(naive.and_utc()))
    }

    fn instant(self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
            Self::DateTime(instant) => instant,
        }
    }
}

fn invalid_time(raw: &str, error: &chrono::ParseError) -> DigestError {
    DigestError::Calendar {
        message: format!("invalid date or time '{raw}': {error}"),
    }
}

/// Parses an RFC 5545 duration such as `PT1H30M`, `P1D`, or `-P2W`.
///
/// # Errors
///
/// Returns [`DigestError::Calendar`] for malformed durations.
pub fn parse_duration(raw: &str) -> Result<TimeDelta, DigestError> {
    let invalid = || DigestError::Calendar {
        message: format!("invalid duration '{raw}'"),
    };

    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let body = unsigned.strip_prefix('P').ok_or_else(invalid)?;

    let mut seconds = 0_i64;
    let mut digits = String::new();
    let mut in_time = false;
    let mut saw_component = false;
    for character in body.chars() {
        if character.is_ascii_digit() {
            digits.push(character);
            continue;
        }
        if character == 'T' {
            in_time = true;
            continue;
        }
        let value: i64 = digits.parse().map_err(|_| invalid())?;
        digits.clear();
        let unit = match (character, in_time) {
            ('W', false) => 604_800,
            ('D', false) => 86_400,
            ('H', true) => 3_600,
            ('M', true) => 60,
            ('S', true) => 1,
            _ => return Err(invalid()),
        };
        seconds = value
            .checked_mul(unit)
            .and_then(|part| seconds.checked_add(part))
            .ok_or_else(invalid)?;
        saw_component = true;
    }
    if !digits.is_empty() || !saw_component {
        return Err(invalid());
    }

    let signed = if negative { -seconds } else { seconds };
    TimeDelta::try_seconds(signed).ok_or_else(invalid)
}

fn find_property<'c, 'a>(component: &'c Component<'a>, name: &str) -> Option<&'c Property<'a>> {
    component
        .properties
        .iter()
        .find(|property| property.name.as_str().eq_ignore_ascii_case(name))
}

fn parameter<'p>(property: &'p Property<'_>, key: &str) -> Option<&'p str> {
    property
        .params
        .iter()
        .find(|param| param.key.as_str().eq_ignore_ascii_case(key))
        .and_then(|param| param.val.as_ref())
        .map(|value| value.as_str().trim_matches('"'))
}

fn text_value(component: &Component<'_>, name: &str) -> Option<String> {
    find_property(component, name)
        .map(|property| unescape_text(property.val.as_str()))
        .filter(|text| !text.trim().is_empty())
}

fn attendees(component: &Component<'_>) -> Vec<Attendee> {
    component
        .properties
        .iter()
        .filter(|property| property.name.as_str().eq_ignore_ascii_case("ATTENDEE"))
        .map(attendee)
        .collect()
}

fn attendee(property: &Property<'_>) -> Attendee {
    let raw = property.val.as_str().trim();
    let address = raw
        .get(..MAILTO.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(MAILTO))
        .and_then(|_| raw.get(MAILTO.len()..))
        .unwrap_or(raw);
    Attendee {
        address: address.to_owned(),
        common_name: parameter(property, "CN")
            .filter(|name| !name.is_empty())
            .map(ToOwned::to_owned),
        participation: parameter(property, "PARTSTAT").map(str::to_ascii_uppercase),
    }
}

/// Decodes iCalendar text escapes (`\n`, `\,`, `\;`, `\\`).
#[must_use]
pub fn unescape_text(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(character) = chars.next() {
        if character != '\\' {
            output.push(character);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => output.push('\n'),
            Some(other) => output.push(other),
            None => output.push('\\'),
        }
    }
    output
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
