//! Time zones declared inside the calendar through `VTIMEZONE` blocks.
//!
//! Exchange and Outlook exports name zones after Windows (`W. Europe Standard
//! Time`), which the IANA database does not know. Such files still describe
//! each zone with `STANDARD` and `DAYLIGHT` observances, and those are read
//! here. Only yearly rules of the `BYMONTH` plus `BYDAY` shape are followed;
//! any other observance applies from its `DTSTART` onwards.

use std::collections::HashMap;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday,
};
use icalendar::parser::Component;

/// Local date-time format of observance onsets.
const ONSET_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Zones declared by the calendar, keyed by `TZID`.
#[derive(Debug, Clone, Default)]
pub struct ZoneTable {
    zones: HashMap<String, DeclaredZone>,
}

impl ZoneTable {
    /// Collects every readable `VTIMEZONE` at any nesting depth.
    ///
    /// Observances with a missing or malformed onset or offset are skipped.
    #[must_use]
    pub fn from_components(components: &[Component<'_>]) -> Self {
        let mut table = Self::default();
        table.collect(components);
        table
    }

    fn collect(&mut self, components: &[Component<'_>]) {
        for component in components {
            let declared = component
                .name
                .as_str()
                .eq_ignore_ascii_case("VTIMEZONE")
                .then(|| DeclaredZone::from_component(component))
                .flatten();
            if let Some((name, zone)) = declared {
                self.zones.insert(name, zone);
            }
            self.collect(&component.components);
        }
    }

    /// Converts `local` in the zone called `name` to UTC, or `None` when the
    /// calendar does not declare that zone.
    #[must_use]
    pub fn to_utc(&self, name: &str, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        let offset = self.zones.get(name)?.offset_at(local)?;
        offset
            .from_local_datetime(&local)
            .single()
            .map(|instant| instant.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone)]
struct DeclaredZone {
    observances: Vec<Observance>,
}

impl DeclaredZone {
    fn from_component(component: &Component<'_>) -> Option<(String, Self)> {
        let name = property_value(component, "TZID")?.trim().to_owned();
        let observances: Vec<Observance> = component
            .components
            .iter()
            .filter(|child| {
                let kind = child.name.as_str();
                kind.eq_ignore_ascii_case("STANDARD") || kind.eq_ignore_ascii_case("DAYLIGHT")
            })
            .filter_map(Observance::from_component)
            .collect();
        if observances.is_empty() {
            return None;
        }
        Some((name, Self { observances }))
    }

    /// Offset of the observance whose most recent onset precedes `local`.
    /// Before any onset, the offset the earliest observance changes from
    /// applies.
    fn offset_at(&self, local: NaiveDateTime) -> Option<FixedOffset> {
        self.observances
            .iter()
            .filter_map(|observance| {
                observance
                    .latest_onset(local)
                    .map(|onset| (onset, observance.offset))
            })
            .max_by_key(|(onset, _)| *onset)
            .map(|(_, offset)| offset)
            .or_else(|| {
                self.observances
                    .iter()
                    .min_by_key(|observance| observance.start)
                    .map(|observance| observance.offset_from)
            })
    }
}

#[derive(Debug, Clone)]
struct Observance {
    start: NaiveDateTime,
    offset: FixedOffset,
    offset_from: FixedOffset,
    rule: Option<YearlyRule>,
}

impl Observance {
    fn from_component(component: &Component<'_>) -> Option<Self> {
        let start =
            NaiveDateTime::parse_from_str(property_value(component, "DTSTART")?.trim(), ONSET_FORMAT)
                .ok()?;
        let offset = parse_utc_offset(property_value(component, "TZOFFSETTO")?)?;
        let offset_from = property_value(component, "TZOFFSETFROM")
            .and_then(parse_utc_offset)
            .unwrap_or(offset);
        let rule = property_value(component, "RRULE").and_then(YearlyRule::parse);
        Some(Self {
            start,
            offset,
            offset_from,
            rule,
        })
    }

    /// Latest onset of this observance at or before `local`.
    fn latest_onset(&self, local: NaiveDateTime) -> Option<NaiveDateTime> {
        let onset = self.rule.map_or(Some(self.start), |rule| {
            rule.onset(local.year(), self)
                .filter(|onset| *onset <= local)
                .or_else(|| rule.onset(local.year() - 1, self))
        })?;
        (onset <= local && onset >= self.start).then_some(onset)
    }
}

/// `FREQ=YEARLY;BYMONTH=m;BYDAY=nDD` recurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearlyRule {
    month: u32,
    week: i8,
    weekday: Weekday,
}

impl YearlyRule {
    fn parse(raw: &str) -> Option<Self> {
        let mut yearly = false;
        let mut month = None;
        let mut by_day = None;
        for part in raw.split(';') {
            let (key, value) = part.split_once('=')?;
            match key.trim().to_ascii_uppercase().as_str() {
                "FREQ" => yearly = value.trim().eq_ignore_ascii_case("YEARLY"),
                "BYMONTH" => month = value.trim().parse::<u32>().ok(),
                "BYDAY" => by_day = Some(value.trim()),
                _ => {}
            }
        }
        if !yearly {
            return None;
        }

        let day = by_day?;
        let split = day.len().checked_sub(2)?;
        let week = match day.get(..split)? {
            "" => 1,
            count => count.trim_start_matches('+').parse::<i8>().ok()?,
        };
        let weekday = parse_weekday(day.get(split..)?)?;
        Some(Self {
            month: month.filter(|value| (1..=12).contains(value))?,
            week,
            weekday,
        })
    }

    /// Onset in `year` at the time of day of the observance start.
    fn onset(self, year: i32, observance: &Observance) -> Option<NaiveDateTime> {
        let date = if self.week > 0 {
            NaiveDate::from_weekday_of_month_opt(
                year,
                self.month,
                self.weekday,
                u8::try_from(self.week).ok()?,
            )?
        } else {
            let last = last_weekday_of_month(year, self.month, self.weekday)?;
            let weeks_back = u64::from(self.week.unsigned_abs()).checked_sub(1)?;
            let earlier = last.checked_sub_days(Days::new(weeks_back * 7))?;
            (earlier.month() == self.month).then_some(earlier)?
        };
        Some(date.and_time(observance.start.time()))
    }
}

fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let mut day = first_of_next.pred_opt()?;
    while day.weekday() != weekday {
        day = day.pred_opt()?;
    }
    Some(day)
}

fn parse_weekday(code: &str) -> Option<Weekday> {
    match code.to_ascii_uppercase().as_str() {
        "MO" => Some(Weekday::Mon),
        "TU" => Some(Weekday::Tue),
        "WE" => Some(Weekday::Wed),
        "TH" => Some(Weekday::Thu),
        "FR" => Some(Weekday::Fri),
        "SA" => Some(Weekday::Sat),
        "SU" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parses `+HHMM`, `-HHMM`, or `+HHMMSS`.
fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let trimmed = raw.trim();
    let sign = match trimmed.get(..1)? {
        "+" => 1,
        "-" => -1,
        _ => return None,
    };
    let digits = trimmed.get(1..)?;
    if !matches!(digits.len(), 4 | 6) || !digits.chars().all(|digit| digit.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    let seconds: i32 = match digits.get(4..)? {
        "" => 0,
        rest => rest.parse().ok()?,
    };
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60 + seconds))
}

fn property_value<'c>(component: &'c Component<'_>, name: &str) -> Option<&'c str> {
    component
        .properties
        .iter()
        .find(|property| property.name.as_str().eq_ignore_ascii_case(name))
        .map(|property| property.val.as_str())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
    use icalendar::parser::{read_calendar, unfold};
    use rstest::rstest;

    use super::{ZoneTable, parse_utc_offset};
    use crate::calendar::test_support::WINDOWS_BERLIN_ZONE;

    fn table() -> ZoneTable {
        let text = format!("BEGIN:VCALENDAR\r\n{WINDOWS_BERLIN_ZONE}END:VCALENDAR\r\n");
        let unfolded = unfold(&text);
        let calendar = read_calendar(&unfolded).expect("calendar should parse");
        ZoneTable::from_components(&calendar.components)
    }

    fn local(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M").expect("valid local time")
    }

    #[rstest]
    #[case::winter("2024-01-05 09:00", (2024, 1, 5, 8))]
    #[case::summer("2024-07-05 09:00", (2024, 7, 5, 7))]
    #[case::day_after_spring_change("2024-04-01 09:00", (2024, 4, 1, 7))]
    #[case::day_before_spring_change("2024-03-30 09:00", (2024, 3, 30, 8))]
    #[case::after_autumn_change("2024-10-28 09:00", (2024, 10, 28, 8))]
    fn declared_zone_follows_yearly_observances(
        #[case] raw: &str,
        #[case] expected: (i32, u32, u32, u32),
    ) {
        let (year, month, day, hour) = expected;
        let instant = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("valid instant");

        assert_eq!(
            table().to_utc("W. Europe Standard Time", local(raw)),
            Some(instant)
        );
    }

    #[test]
    fn undeclared_zone_is_unknown() {
        assert_eq!(table().to_utc("Mars/Olympus", local("2024-01-05 09:00")), None);
    }

    #[test]
    fn time_before_first_onset_uses_earliest_observance() {
        let before = NaiveDate::from_ymd_opt(1500, 6, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid local time");

        let instant = table()
            .to_utc("W. Europe Standard Time", before)
            .expect("zone should resolve");

        assert_eq!(instant, before.and_utc() - chrono::TimeDelta::hours(1));
    }

    #[rstest]
    #[case::east("+0100", Some(3_600))]
    #[case::west("-0530", Some(-19_800))]
    #[case::seconds("+013015", Some(5_415))]
    #[case::missing_sign("0100", None)]
    #[case::short("+1", None)]
    fn parses_utc_offsets(#[case] raw: &str, #[case] seconds: Option<i32>) {
        assert_eq!(
            parse_utc_offset(raw).map(|offset| offset.local_minus_utc()),
            seconds
        );
    }
}
