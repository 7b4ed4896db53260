// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule (RRULE/EXRULE) decoding.

use chrono::DateTime;
use chrono_tz::Tz;
use strum::{AsRefStr, Display, EnumString};

use crate::instant::InstantParser;

/// Recurrence frequency. A FREQ value outside this set leaves the rule
/// inactive, the same as a rule with no FREQ at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Frequency {
    /// Repeats every `interval` days.
    Daily,
    /// Repeats every `interval` weeks.
    Weekly,
    /// Repeats every `interval` months.
    Monthly,
    /// Repeats every `interval` years.
    Yearly,
}

/// One decoded RRULE or EXRULE.
///
/// Both rule kinds share this shape; the slot it occupies on the event
/// decides whether it drives recurrence or exceptions. The `by_*` filters
/// keep their raw string tokens so ordinal-prefixed day codes such as `2SU`
/// survive intact. `by_second`, `by_minute`, `by_hour` and `by_set_pos` are
/// stored but never consulted by the evaluators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// FREQ; absent means the rule is inactive.
    pub frequency: Option<Frequency>,
    /// INTERVAL; treated as 1 when absent.
    pub interval: Option<u32>,
    /// COUNT; total occurrences including the first.
    pub count: Option<u32>,
    /// UNTIL, parsed with the event's own timestamp parser.
    pub until: Option<DateTime<Tz>>,
    /// BYSECOND tokens.
    pub by_second: Option<Vec<String>>,
    /// BYMINUTE tokens.
    pub by_minute: Option<Vec<String>>,
    /// BYHOUR tokens.
    pub by_hour: Option<Vec<String>>,
    /// BYDAY tokens (`MO`, `2SU`, ...).
    pub by_day: Option<Vec<String>>,
    /// BYMONTHDAY tokens.
    pub by_month_day: Option<Vec<String>>,
    /// BYYEARDAY tokens.
    pub by_year_day: Option<Vec<String>>,
    /// BYWEEKNO tokens.
    pub by_week_no: Option<Vec<String>>,
    /// BYMONTH tokens.
    pub by_month: Option<Vec<String>>,
    /// BYSETPOS tokens.
    pub by_set_pos: Option<Vec<String>>,
    /// WKST value.
    pub week_start: Option<String>,
}

impl RecurrenceRule {
    /// Decode a `;`-delimited rule string.
    ///
    /// Unknown segments are ignored and numeric values that fail to parse
    /// are stored as absent; a rule is never an error. Returns the rule plus
    /// whether the UNTIL value was a date-only form (the caller folds that
    /// into the event's all-day flag).
    pub fn parse(text: &str, instants: &InstantParser) -> (Self, bool) {
        let mut rule = RecurrenceRule::default();
        let mut until_was_date_only = false;

        for segment in text.split(';') {
            let Some(value) = segment_value(segment) else {
                continue;
            };

            if segment.contains("FREQ") {
                rule.frequency = value.parse().ok();
            } else if segment.contains("COUNT") {
                rule.count = value.parse().ok();
            } else if segment.contains("UNTIL") {
                if let Some((at, date_only)) = instants.parse(value) {
                    rule.until = Some(at);
                    until_was_date_only = until_was_date_only || date_only;
                }
            } else if segment.contains("INTERVAL") {
                rule.interval = value.parse().ok();
            } else if segment.contains("BYSECOND") {
                rule.by_second = Some(split_list(value));
            } else if segment.contains("BYMINUTE") {
                rule.by_minute = Some(split_list(value));
            } else if segment.contains("BYHOUR") {
                rule.by_hour = Some(split_list(value));
            } else if segment.contains("BYMONTHDAY") {
                rule.by_month_day = Some(split_list(value));
            } else if segment.contains("BYYEARDAY") {
                rule.by_year_day = Some(split_list(value));
            } else if segment.contains("BYWEEKNO") {
                rule.by_week_no = Some(split_list(value));
            } else if segment.contains("BYSETPOS") {
                rule.by_set_pos = Some(split_list(value));
            } else if segment.contains("BYDAY") {
                rule.by_day = Some(split_list(value));
            } else if segment.contains("BYMONTH=") {
                // Matched with the trailing `=` so BYMONTHDAY never lands here.
                rule.by_month = Some(split_list(value));
            } else if segment.contains("WKST") {
                rule.week_start = Some(value.to_string());
            }
        }

        (rule, until_was_date_only)
    }

    /// Whether the rule carries a usable frequency.
    pub fn is_active(&self) -> bool {
        self.frequency.is_some()
    }
}

fn segment_value(segment: &str) -> Option<&str> {
    segment.split_once('=').map(|(_, value)| value.trim())
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::to_string).collect()
}
