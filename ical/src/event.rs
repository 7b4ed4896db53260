// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The assembled calendar event.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::attendee::Attendee;
use crate::instant::InstantParser;
use crate::rrule::RecurrenceRule;

/// The property strings pulled out of one VEVENT block, before assembly.
///
/// Everything is a plain string at this stage; absence is the empty string.
#[derive(Debug, Clone, Default)]
pub struct RawEventFields {
    /// `TZID` value, or empty.
    pub tzid: String,
    /// `DTSTART` value in whichever spelling matched first.
    pub start: String,
    /// `DTEND` value.
    pub end: String,
    /// `DTSTAMP` value.
    pub timestamp: String,
    /// `UID` value.
    pub uid: String,
    /// `RECURRENCE-ID` value.
    pub recurrence_id: String,
    /// `CREATED` value.
    pub created: String,
    /// `DESCRIPTION` value.
    pub description: String,
    /// `LAST-MODIFIED` value.
    pub last_modified: String,
    /// `LOCATION` value.
    pub location: String,
    /// `SEQUENCE` value.
    pub sequence: String,
    /// `STATUS` value.
    pub status: String,
    /// `SUMMARY` value.
    pub summary: String,
    /// `TRANSP` value.
    pub transparency: String,
    /// `RRULE` value.
    pub rrule: String,
    /// `EXRULE` value.
    pub exrule: String,
    /// One entry per `EXDATE` property found.
    pub exception_dates: Vec<String>,
    /// Attendees that survived decoding.
    pub attendees: Vec<Attendee>,
}

/// One parsed VEVENT, immutable after assembly.
///
/// String properties are passed through verbatim except for
/// backslash-stripping on summary, description and location. Timestamps are
/// expressed in the event's own timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// `UID`, used for de-duplication inside a day.
    pub uid: String,
    /// `RECURRENCE-ID` as raw text.
    pub recurrence_id: String,
    /// `SUMMARY` with backslashes stripped.
    pub summary: String,
    /// `DESCRIPTION` with backslashes stripped.
    pub description: String,
    /// `LOCATION` with backslashes stripped.
    pub location: String,
    /// `STATUS` as raw text.
    pub status: String,
    /// `SEQUENCE` as raw text.
    pub sequence: String,
    /// `TRANSP` as raw text.
    pub transparency: String,
    /// `DTSTAMP` as raw text.
    pub timestamp: String,
    /// Parsed `DTSTART`.
    pub start: Option<DateTime<Tz>>,
    /// Parsed `DTEND`.
    pub end: Option<DateTime<Tz>>,
    /// Parsed `CREATED`.
    pub created: Option<DateTime<Tz>>,
    /// Parsed `LAST-MODIFIED`.
    pub last_modified: Option<DateTime<Tz>>,
    /// Set when any of the event's timestamps parsed as a date-only form.
    pub is_all_day: bool,
    /// The raw `TZID` value.
    pub tzid: String,
    /// The resolved timezone all instants above are expressed in.
    pub timezone: Tz,
    /// Attendees in document order.
    pub attendees: Vec<Attendee>,
    /// Parsed `RRULE`, present when the property existed at all.
    pub repeat_rule: Option<RecurrenceRule>,
    /// Parsed `EXRULE`.
    pub exception_rule: Option<RecurrenceRule>,
    /// Instants excluded from the recurring series.
    pub exception_dates: Vec<DateTime<Tz>>,
    /// The unparsed `RRULE` text, kept for round-tripping and diagnostics.
    pub raw_rrule: String,
}

impl CalendarEvent {
    /// Build an event from extracted property strings.
    ///
    /// Unparseable timestamps become absent, never errors; the all-day flag
    /// is sticky across every timestamp parsed for this event, including
    /// rule `UNTIL` values.
    pub fn assemble(fields: RawEventFields) -> Self {
        let instants = InstantParser::new(&fields.tzid);
        let mut all_day = false;

        let mut parse_instant = |value: &str| {
            if value.is_empty() {
                return None;
            }
            match instants.parse(value) {
                Some((at, date_only)) => {
                    all_day = all_day || date_only;
                    Some(at)
                }
                None => {
                    tracing::warn!(value, "unparseable timestamp, leaving it absent");
                    None
                }
            }
        };

        let start = parse_instant(&fields.start);
        let end = parse_instant(&fields.end);
        let created = parse_instant(&fields.created);
        let last_modified = parse_instant(&fields.last_modified);
        let exception_dates: Vec<_> =
            fields.exception_dates.iter().filter_map(|value| parse_instant(value)).collect();

        let (repeat_rule, until_flag) = parse_rule(&fields.rrule, &instants);
        let (exception_rule, ex_until_flag) = parse_rule(&fields.exrule, &instants);
        let all_day = all_day || until_flag || ex_until_flag;

        CalendarEvent {
            uid: fields.uid,
            recurrence_id: fields.recurrence_id,
            summary: fields.summary.replace('\\', ""),
            description: fields.description.replace('\\', ""),
            location: fields.location.replace('\\', ""),
            status: fields.status,
            sequence: fields.sequence,
            transparency: fields.transparency,
            timestamp: fields.timestamp,
            start,
            end,
            created,
            last_modified,
            is_all_day: all_day,
            tzid: fields.tzid,
            timezone: instants.timezone(),
            attendees: fields.attendees,
            repeat_rule,
            exception_rule,
            exception_dates,
            raw_rrule: fields.rrule,
        }
    }

    /// Whether the event recurs, i.e. carries an active repeat rule.
    pub fn repeats(&self) -> bool {
        self.repeat_rule.as_ref().is_some_and(RecurrenceRule::is_active)
    }
}

fn parse_rule(text: &str, instants: &InstantParser) -> (Option<RecurrenceRule>, bool) {
    if text.is_empty() {
        return (None, false);
    }
    let (rule, until_was_date_only) = RecurrenceRule::parse(text, instants);
    (Some(rule), until_was_date_only)
}
