//! iCalendar fixtures shared by calendar tests.

/// Calendar with one attended meeting in the first week of January 2024, one
/// declined meeting, one unanswered invitation, and one attended meeting
/// outside that week.
pub const ATTENDED_CALENDAR: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "PRODID:-//Example//Calendar//EN\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:sync-1\r\n",
    "SUMMARY:Sampler sync\r\n",
    "DTSTART:20240102T100000Z\r\n",
    "DTEND:20240102T113000Z\r\n",
    "DESCRIPTION:Review the sampler\\, then plan.\\n-::~:~::~:~::-\\nJoin with Goog\r\n",
    " le Meet: https://meet.google.com/abc-defg-hij\\n-::~:~::~:~::-\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=ACCEPTED:mailto:alice@example.com\r\n",
    "ATTENDEE;CN=Bob Roe;PARTSTAT=TENTATIVE:mailto:bob@example.com\r\n",
    "END:VEVENT\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:review-2\r\n",
    "SUMMARY:Declined review\r\n",
    "DTSTART:20240103T090000Z\r\n",
    "DTEND:20240103T100000Z\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=DECLINED:mailto:alice@example.com\r\n",
    "END:VEVENT\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:planning-3\r\n",
    "SUMMARY:Unanswered planning\r\n",
    "DTSTART:20240104T090000Z\r\n",
    "DTEND:20240104T100000Z\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=NEEDS-ACTION:mailto:alice@example.com\r\n",
    "END:VEVENT\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:retro-4\r\n",
    "SUMMARY:Later retro\r\n",
    "DTSTART:20240112T090000Z\r\n",
    "DTEND:20240112T100000Z\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=ACCEPTED:mailto:alice@example.com\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

/// Outlook-style zone definition for Central European time under its Windows
/// name, which the IANA database does not know. Embed it between
/// `BEGIN:VCALENDAR` and `END:VCALENDAR`.
pub const WINDOWS_BERLIN_ZONE: &str = concat!(
    "BEGIN:VTIMEZONE\r\n",
    "TZID:W. Europe Standard Time\r\n",
    "BEGIN:STANDARD\r\n",
    "DTSTART:16010101T030000\r\n",
    "TZOFFSETFROM:+0200\r\n",
    "TZOFFSETTO:+0100\r\n",
    "RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=-1SU;BYMONTH=10\r\n",
    "END:STANDARD\r\n",
    "BEGIN:DAYLIGHT\r\n",
    "DTSTART:16010101T020000\r\n",
    "TZOFFSETFROM:+0100\r\n",
    "TZOFFSETTO:+0200\r\n",
    "RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=-1SU;BYMONTH=3\r\n",
    "END:DAYLIGHT\r\n",
    "END:VTIMEZONE\r\n",
);

/// Wraps each event's `body` lines in a `VEVENT`, preceded by `preamble`
/// components, inside one calendar.
pub fn calendar_of(preamble: &str, events: &[&[&str]]) -> String {
    let mut text = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
    text.push_str(preamble);
    for body in events {
        text.push_str("BEGIN:VEVENT\r\n");
        for line in *body {
            text.push_str(line);
            text.push_str("\r\n");
        }
        text.push_str("END:VEVENT\r\n");
    }
    text.push_str("END:VCALENDAR\r\n");
    text
}

/// Wraps `body` lines in a calendar containing a single event.
pub fn single_event(body: &[&str]) -> String {
    calendar_of("", &[body])
}
