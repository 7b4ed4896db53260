// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! One concrete occurrence of an event, rebased onto a chosen day.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use icalq_ical::CalendarEvent;

/// The export shape handed to platform calendar integrations: the event's
/// display fields plus a start/end window carrying the selected day's date
/// and the event's own time-of-day.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub title: String,
    pub notes: String,
    pub location: String,
    pub is_all_day: bool,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Build the occurrence of `event` on `day`.
///
/// Returns `None` when the event has no start or end instant. The day is
/// applied to both window edges, so an occurrence spanning midnight comes
/// back with a degenerate window; callers pick the day an occurrence starts.
pub fn occurrence_on(event: &CalendarEvent, day: NaiveDate) -> Option<Occurrence> {
    let start = rebase(event.start?, day, event.timezone);
    let end = rebase(event.end?, day, event.timezone);
    Some(Occurrence {
        title: event.summary.clone(),
        notes: event.description.clone(),
        location: event.location.clone(),
        is_all_day: event.is_all_day,
        start,
        end,
    })
}

fn rebase(at: DateTime<Tz>, day: NaiveDate, tz: Tz) -> DateTime<Tz> {
    let wall = day.and_time(at.time());
    match tz.from_local_datetime(&wall).earliest() {
        Some(shifted) => shifted,
        None => Utc.from_utc_datetime(&wall).with_timezone(&tz),
    }
}
