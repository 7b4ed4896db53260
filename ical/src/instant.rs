// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Timestamp parsing in an event's own timezone.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

const FORMAT_DATETIME: &str = "%Y%m%d %H%M%S";
const FORMAT_DATE: &str = "%Y%m%d";

/// Resolve a `TZID` value to a timezone, falling back to UTC.
///
/// An empty identifier is the common case (plain `DTSTART:` with a `Z`
/// suffix) and is not worth a log line; an identifier the timezone database
/// does not know is.
pub fn resolve_timezone(tzid: &str) -> Tz {
    if tzid.is_empty() {
        return Tz::UTC;
    }
    match tzid.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(tzid, "unknown timezone identifier, falling back to UTC");
            Tz::UTC
        }
    }
}

/// Parses the timestamp strings found in one VEVENT.
///
/// One parser is built per event, carrying the event's timezone; `DTSTART`,
/// `DTEND`, `CREATED`, `LAST-MODIFIED`, `EXDATE` and rule `UNTIL` values all
/// go through it.
#[derive(Debug, Clone, Copy)]
pub struct InstantParser {
    tz: Tz,
}

impl InstantParser {
    /// Build a parser for the given `TZID` value (may be empty).
    pub fn new(tzid: &str) -> Self {
        Self { tz: resolve_timezone(tzid) }
    }

    /// The timezone every parsed instant is expressed in.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Parse one ICS timestamp.
    ///
    /// `T` is treated as a date/time separator and a trailing `z`/`Z` marks
    /// the digits as UTC wall-clock time. Tried in order: full date-time,
    /// then date-only (midnight). Returns the instant plus whether the value
    /// was a date-only (all-day) form; anything unparseable yields `None`.
    pub fn parse(&self, value: &str) -> Option<(DateTime<Tz>, bool)> {
        let value = value.replace('T', " ");
        let (digits, zoned) = match value.strip_suffix(['z', 'Z']) {
            Some(stripped) => (stripped.trim(), true),
            None => (value.trim(), false),
        };

        if let Ok(wall) = NaiveDateTime::parse_from_str(digits, FORMAT_DATETIME) {
            return self.resolve(wall, zoned).map(|at| (at, false));
        }

        let date = NaiveDate::parse_from_str(digits, FORMAT_DATE).ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        self.resolve(midnight, zoned).map(|at| (at, true))
    }

    fn resolve(&self, wall: NaiveDateTime, zoned: bool) -> Option<DateTime<Tz>> {
        if zoned {
            return Some(Utc.from_utc_datetime(&wall).with_timezone(&self.tz));
        }
        match self.tz.from_local_datetime(&wall) {
            LocalResult::Single(at) => Some(at),
            LocalResult::Ambiguous(earliest, _) => {
                tracing::warn!(%wall, "ambiguous local time, picking earliest");
                Some(earliest)
            }
            LocalResult::None => {
                tracing::warn!(%wall, "nonexistent local time, interpreting as UTC");
                Some(Utc.from_utc_datetime(&wall).with_timezone(&self.tz))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn parses_utc_datetime() {
        let parser = InstantParser::new("");
        let (at, all_day) = parser.parse("20181213T150000Z").unwrap();
        assert_eq!(at.with_timezone(&Utc).to_rfc3339(), "2018-12-13T15:00:00+00:00");
        assert!(!all_day);
    }

    #[test]
    fn parses_wall_clock_time_in_event_timezone() {
        let parser = InstantParser::new("America/New_York");
        let (at, _) = parser.parse("20190617T090000").unwrap();
        assert_eq!(at.hour(), 9);
        // 09:00 EDT is 13:00 UTC.
        assert_eq!(at.with_timezone(&Utc).hour(), 13);
    }

    #[test]
    fn date_only_value_reports_all_day() {
        let parser = InstantParser::new("");
        let (at, all_day) = parser.parse("20190406").unwrap();
        assert!(all_day);
        assert_eq!(at.with_timezone(&Utc).to_rfc3339(), "2019-04-06T00:00:00+00:00");
    }

    #[test]
    fn unparseable_value_yields_none() {
        let parser = InstantParser::new("");
        assert!(parser.parse("").is_none());
        assert!(parser.parse("not-a-date").is_none());
        assert!(parser.parse("2019-04-06").is_none());
    }

    #[test]
    fn unknown_timezone_degrades_to_utc() {
        let parser = InstantParser::new("Mars/Olympus_Mons");
        assert_eq!(parser.timezone(), Tz::UTC);
        let (at, _) = parser.parse("20190617T010000").unwrap();
        assert_eq!(at.with_timezone(&Utc).hour(), 1);
    }
}
