// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Occurrence evaluation for parsed events.
//!
//! All component math (weekday, day-of-month, month deltas) runs in the
//! event's own timezone; instant comparisons are timezone-independent. Every
//! malformed input resolves to "does not occur", never an error.

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use icalq_ical::{CalendarEvent, Frequency, RecurrenceRule};

/// Occurrence queries over one event.
pub trait Occurs {
    /// Whether an occurrence of the event starts at (or, for recurring
    /// events, on a day matching) the given instant.
    fn occurs_on(&self, at: DateTime<Utc>) -> bool;

    /// [`Occurs::occurs_on`] evaluated at the day's local midnight in the
    /// event's timezone.
    fn occurs_on_day(&self, day: NaiveDate) -> bool;

    /// Whether the event's exception rule suppresses the given instant.
    fn exception_on(&self, at: DateTime<Utc>) -> bool;

    /// Whether the instant falls inside an occurrence's start/end window.
    fn covers(&self, at: DateTime<Utc>) -> bool;
}

impl Occurs for CalendarEvent {
    fn occurs_on(&self, at: DateTime<Utc>) -> bool {
        occurs_at(self, at.with_timezone(&self.timezone))
    }

    fn occurs_on_day(&self, day: NaiveDate) -> bool {
        occurs_at(self, local_midnight(self.timezone, day))
    }

    fn exception_on(&self, at: DateTime<Utc>) -> bool {
        exception_at(self, at.with_timezone(&self.timezone))
    }

    fn covers(&self, at: DateTime<Utc>) -> bool {
        covers_at(self, at.with_timezone(&self.timezone))
    }
}

fn occurs_at(event: &CalendarEvent, at: DateTime<Tz>) -> bool {
    let (Some(start), Some(end)) = (event.start, event.end) else {
        return false;
    };
    if start > at {
        return false;
    }

    let Some(rule) = active_rule(event.repeat_rule.as_ref()) else {
        // Without a repeat rule the event occurs at its start instant only.
        return at == start && !exception_at(event, at);
    };

    if on_excluded_day(event, at) {
        return false;
    }
    if !filters_accept(rule, at) {
        return false;
    }
    bound_accepts(rule, end, Some(start), at)
}

/// Mirror of [`occurs_at`] driven by the exception rule. The open-ended
/// branch anchors at the created instant, not the start instant; that
/// asymmetry is long-standing observed behavior and is kept on purpose.
fn exception_at(event: &CalendarEvent, at: DateTime<Tz>) -> bool {
    let Some(rule) = active_rule(event.exception_rule.as_ref()) else {
        return false;
    };
    let Some(end) = event.end else {
        return false;
    };

    if on_excluded_day(event, at) {
        return false;
    }
    if !filters_accept(rule, at) {
        return false;
    }
    bound_accepts(rule, end, event.created, at)
}

fn covers_at(event: &CalendarEvent, at: DateTime<Tz>) -> bool {
    let (Some(start), Some(end)) = (event.start, event.end) else {
        return false;
    };

    if !event.repeats() {
        return within(at, start, end);
    }

    if occurs_at(event, at) {
        // Rebase the first occurrence's window onto the target day.
        let (months, days) = span_between(start, at);
        let window_start = shift(start, months, days);
        let window_end = shift(end, months, days);
        return within(at, window_start, window_end);
    }

    // An occurrence that began the previous day may span midnight into the
    // target instant. Probe one second before the target day starts; this
    // construction only reaches occurrences spanning at most two days.
    let probe = local_midnight(event.timezone, at.date_naive()) - TimeDelta::seconds(1);
    if occurs_at(event, probe) {
        let (months, days) = span_between(end, at);
        let window_start = shift(start, months, days);
        let window_end = shift(end, months, days);
        return within(at, window_start, window_end) && within(probe, window_start, window_end);
    }

    false
}

fn active_rule(rule: Option<&RecurrenceRule>) -> Option<&RecurrenceRule> {
    rule.filter(|rule| rule.is_active())
}

fn on_excluded_day(event: &CalendarEvent, at: DateTime<Tz>) -> bool {
    let day = at.date_naive();
    event.exception_dates.iter().any(|excluded| excluded.date_naive() == day)
}

/// The `by*` list filters. Each list rejects the date unless it names the
/// date's own component; absent lists do not filter. Numeric components are
/// matched as exact strings, so a zero-padded token never matches.
fn filters_accept(rule: &RecurrenceRule, at: DateTime<Tz>) -> bool {
    if let Some(by_day) = &rule.by_day {
        let token = weekday_token(at.weekday());
        // Ordinal-in-month forms (`2SU` = second Sunday) accept on the bare
        // weekday; the ordinal itself is not verified.
        let accepted = by_day.iter().any(|entry| {
            entry == token
                || (1..=3).any(|ordinal| *entry == format!("{ordinal}{token}"))
        });
        if !accepted {
            return false;
        }
    }
    if let Some(by_month_day) = &rule.by_month_day
        && !by_month_day.contains(&at.day().to_string())
    {
        return false;
    }
    if let Some(by_year_day) = &rule.by_year_day
        && !by_year_day.contains(&at.ordinal().to_string())
    {
        return false;
    }
    if let Some(by_week_no) = &rule.by_week_no
        && !by_week_no.contains(&at.iso_week().week().to_string())
    {
        return false;
    }
    if let Some(by_month) = &rule.by_month
        && !by_month.contains(&at.month().to_string())
    {
        return false;
    }
    true
}

/// The frequency bound check. `count` turns into a last-occurrence bound
/// computed from the end instant; `until` is its own bound; an open-ended
/// rule measures from `open_anchor`. In every case the distance to the bound
/// (or anchor) must divide evenly by the interval.
fn bound_accepts(
    rule: &RecurrenceRule,
    end: DateTime<Tz>,
    open_anchor: Option<DateTime<Tz>>,
    at: DateTime<Tz>,
) -> bool {
    let Some(frequency) = rule.frequency else {
        return false;
    };
    let interval = i64::from(rule.interval.unwrap_or(1).max(1));

    match frequency {
        Frequency::Daily | Frequency::Weekly => {
            let step = if frequency == Frequency::Weekly { 7 } else { 1 };
            if let Some(count) = rule.count {
                let bound = end + TimeDelta::days((i64::from(count) - 1) * interval * step);
                at <= bound && days_between(bound, at) % interval == 0
            } else if let Some(until) = rule.until {
                at <= until && days_between(until, at) % interval == 0
            } else if let Some(anchor) = open_anchor {
                days_between(anchor, at) % interval == 0
            } else {
                false
            }
        }
        Frequency::Monthly | Frequency::Yearly => {
            let months_per_unit = if frequency == Frequency::Yearly { 12 } else { 1 };
            let units_between = |from: DateTime<Tz>, to: DateTime<Tz>| {
                months_between(from, to) / months_per_unit
            };
            if let Some(count) = rule.count {
                let bound =
                    shift_months(end, (i64::from(count) - 1) * interval * months_per_unit);
                at <= bound && units_between(bound, at) % interval == 0
            } else if let Some(until) = rule.until {
                at <= until && units_between(until, at) % interval == 0
            } else if let Some(anchor) = open_anchor {
                units_between(anchor, at) % interval == 0
            } else {
                false
            }
        }
    }
}

fn within(at: DateTime<Tz>, start: DateTime<Tz>, end: DateTime<Tz>) -> bool {
    start < end && start <= at && at <= end
}

/// Complete days from `from` to `to`, truncated toward zero.
fn days_between(from: DateTime<Tz>, to: DateTime<Tz>) -> i64 {
    (to - from).num_days()
}

/// Complete calendar months from `from` to `to`, truncated toward zero.
fn months_between(from: DateTime<Tz>, to: DateTime<Tz>) -> i64 {
    let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + i64::from(to.month())
        - i64::from(from.month());
    if months > 0 && shift_months(from, months) > to {
        months -= 1;
    } else if months < 0 && shift_months(from, months) < to {
        months += 1;
    }
    months
}

/// The month/day decomposition of `to - from`, for rebasing a window onto
/// another day.
fn span_between(from: DateTime<Tz>, to: DateTime<Tz>) -> (i64, i64) {
    let months = months_between(from, to);
    let days = days_between(shift_months(from, months), to);
    (months, days)
}

fn shift(at: DateTime<Tz>, months: i64, days: i64) -> DateTime<Tz> {
    shift_months(at, months) + TimeDelta::days(days)
}

fn shift_months(at: DateTime<Tz>, months: i64) -> DateTime<Tz> {
    let span = Months::new(u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX));
    let shifted =
        if months >= 0 { at.checked_add_months(span) } else { at.checked_sub_months(span) };
    shifted.unwrap_or(at)
}

fn local_midnight(tz: Tz, day: NaiveDate) -> DateTime<Tz> {
    let wall = day.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    // A skipped local midnight (spring-forward at 00:00) degrades to the
    // UTC reading of the same digits, matching the timestamp parser.
    match tz.from_local_datetime(&wall).earliest() {
        Some(at) => at,
        None => Utc.from_utc_datetime(&wall).with_timezone(&tz),
    }
}

fn weekday_token(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "SU",
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
    }
}
