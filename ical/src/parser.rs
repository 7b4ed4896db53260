// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! ICS document scanning: unfolding plus per-VEVENT property extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::attendee::Attendee;
use crate::event::{CalendarEvent, RawEventFields};
use crate::extract::{extract, extract_first};

static FOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]+").expect("fold pattern is valid"));

/// Join folded content lines (RFC 5545 section 3.1).
///
/// A line break followed by whitespace is a continuation; the break and the
/// leading whitespace are removed so every property sits on one line.
pub fn unfold(document: &str) -> String {
    FOLD.replace_all(document, "").into_owned()
}

/// Parse every VEVENT block of an ICS document.
///
/// Content outside VEVENT blocks (the VCALENDAR preamble, VTIMEZONE
/// definitions) is skipped. Blocks that fail to yield sensible properties
/// still produce an event with those properties absent; this function has no
/// error path.
pub fn parse_events(document: &str) -> Vec<CalendarEvent> {
    let unfolded = unfold(document);
    unfolded
        .split("BEGIN:VEVENT")
        .skip(1)
        .map(|block| CalendarEvent::assemble(scan_block(block)))
        .collect()
}

fn scan_block(block: &str) -> RawEventFields {
    // Two spellings for the timezone: a DTSTART parameter or a bare TZID
    // property (the latter is nonstandard but seen in the wild).
    let tzid = extract_first(block, &[("DTSTART;TZID=", ":"), ("TZID:", "\n")]).unwrap_or_default();

    let start_zoned = format!("DTSTART;TZID={tzid}:");
    let start = extract_first(
        block,
        &[(&start_zoned, "\n"), ("DTSTART:", "\n"), ("DTSTART;VALUE=DATE:", "\n")],
    )
    .unwrap_or_default();

    let end_zoned = format!("DTEND;TZID={tzid}:");
    let end = extract_first(
        block,
        &[(&end_zoned, "\n"), ("DTEND:", "\n"), ("DTEND;VALUE=DATE:", "\n")],
    )
    .unwrap_or_default();

    let recurrence_zoned = format!("RECURRENCE-ID;TZID={tzid}:");

    RawEventFields {
        start,
        end,
        timestamp: extract(block, "DTSTAMP:", "\n").unwrap_or_default(),
        uid: extract(block, "UID:", "\n").unwrap_or_default(),
        recurrence_id: extract(block, &recurrence_zoned, "\n").unwrap_or_default(),
        created: extract(block, "CREATED:", "\n").unwrap_or_default(),
        description: scan_description(block),
        last_modified: extract(block, "LAST-MODIFIED:", "\n").unwrap_or_default(),
        location: extract(block, "LOCATION:", "\n").unwrap_or_default(),
        sequence: extract(block, "SEQUENCE:", "\n").unwrap_or_default(),
        status: extract(block, "STATUS:", "\n").unwrap_or_default(),
        summary: extract(block, "SUMMARY:", "\n").unwrap_or_default(),
        transparency: extract(block, "TRANSP:", "\n").unwrap_or_default(),
        rrule: extract(block, "RRULE:", "\n").unwrap_or_default(),
        exrule: extract(block, "EXRULE:", "\n").unwrap_or_default(),
        exception_dates: scan_exception_dates(block),
        attendees: scan_attendees(block),
        tzid,
    }
}

/// Plain `DESCRIPTION:` first, then the parameterized form
/// (`DESCRIPTION;ALTREP=...:` and friends) with the parameter list skipped.
fn scan_description(block: &str) -> String {
    if let Some(value) = extract(block, "DESCRIPTION:", "\n")
        && !value.is_empty()
    {
        return value;
    }
    let Some(at) = block.find("DESCRIPTION;") else {
        return String::new();
    };
    let rest = &block[at..];
    let Some(colon) = rest.find(':') else {
        return String::new();
    };
    let value = &rest[colon + 1..];
    let value = match value.find('\n') {
        Some(stop) => &value[..stop],
        None => value,
    };
    value.trim().to_string()
}

fn scan_attendees(block: &str) -> Vec<Attendee> {
    block
        .lines()
        .filter_map(|line| line.split_once("ATTENDEE;"))
        .filter_map(|(_, rest)| Attendee::parse(rest.trim()))
        .collect()
}

/// Every `EXDATE` property in the block, raw value text only. Both the bare
/// and the parameterized (`EXDATE;TZID=...:`) spellings count.
fn scan_exception_dates(block: &str) -> Vec<String> {
    block
        .lines()
        .filter(|line| line.starts_with("EXDATE"))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_joins_continuation_lines() {
        let folded = "DESCRIPTION:part one an\n d part two an\r\n\td three\nUID:x\n";
        assert_eq!(unfold(folded), "DESCRIPTION:part one and part two and three\nUID:x\n");
    }

    #[test]
    fn unfold_leaves_ordinary_line_breaks_alone() {
        assert_eq!(unfold("SUMMARY:a\nUID:b\n"), "SUMMARY:a\nUID:b\n");
    }

    #[test]
    fn preamble_without_events_yields_nothing() {
        let document = "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n";
        assert!(parse_events(document).is_empty());
    }

    #[test]
    fn zoned_start_marker_wins_over_bare_one() {
        let block = "\nDTSTART;TZID=Europe/London:20190617T090000\nDTEND;TZID=Europe/London:20190617T100000\nUID:a\n";
        let fields = scan_block(block);
        assert_eq!(fields.tzid, "Europe/London");
        assert_eq!(fields.start, "20190617T090000");
        assert_eq!(fields.end, "20190617T100000");
    }

    #[test]
    fn value_date_fallback_is_reached() {
        let block = "\nDTSTART;VALUE=DATE:20190406\nDTEND;VALUE=DATE:20190407\n";
        let fields = scan_block(block);
        assert!(fields.tzid.is_empty());
        assert_eq!(fields.start, "20190406");
        assert_eq!(fields.end, "20190407");
    }

    #[test]
    fn parameterized_description_is_found_when_plain_is_absent() {
        let block = "\nDESCRIPTION;ALTREP=\"cid:x\":The real text\nUID:a\n";
        assert_eq!(scan_description(block), "The real text");
    }

    #[test]
    fn every_exdate_line_is_collected() {
        let block = "\nEXDATE:20190501T090000Z\nEXDATE;TZID=Europe/London:20190508T090000\nUID:a\n";
        assert_eq!(
            scan_exception_dates(block),
            vec!["20190501T090000Z", "20190508T090000"]
        );
    }

    #[test]
    fn malformed_attendees_are_dropped_and_valid_ones_kept() {
        let block = "\nATTENDEE;ROLE=CHAIR;PARTSTAT=ACCEPTED;CN=Ann:mailto:ann@example.com\nATTENDEE;ROLE=WIZARD;PARTSTAT=ACCEPTED;CN=Bad:mailto:bad@example.com\n";
        let attendees = scan_attendees(block);
        assert_eq!(attendees.len(), 1);
        assert_eq!(attendees[0].common_name, "Ann");
    }
}
