// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! The single scanning primitive every property lookup is built on.

/// Scan `block` for `start` and capture the text up to the next `end` marker.
///
/// Returns `None` when the start marker is absent. The capture begins at the
/// marker itself (the marker is stripped from the result) and runs to the
/// first occurrence of `end`, or to the end of the block when the terminator
/// is missing. Surrounding whitespace, including stray CR/LF left over from
/// unfolding, is trimmed.
pub fn extract(block: &str, start: &str, end: &str) -> Option<String> {
    let at = block.find(start)?;
    let rest = &block[at..];
    let captured = match rest.find(end) {
        Some(stop) => &rest[..stop],
        None => rest,
    };
    Some(captured.replace(start, "").trim().to_string())
}

/// Try marker pairs in order and return the first non-empty capture.
///
/// Callers list the most specific spelling first, e.g. `DTSTART;TZID=<tz>:`
/// before `DTSTART:` before `DTSTART;VALUE=DATE:`.
pub fn extract_first(block: &str, markers: &[(&str, &str)]) -> Option<String> {
    markers
        .iter()
        .find_map(|(start, end)| extract(block, start, end).filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_value_between_markers() {
        let block = "UID:abc-123\nSUMMARY:Standup\nLOCATION:Room 4\n";
        assert_eq!(extract(block, "SUMMARY:", "\n").unwrap(), "Standup");
    }

    #[test]
    fn missing_start_marker_yields_none() {
        assert_eq!(extract("UID:abc\n", "SUMMARY:", "\n"), None);
    }

    #[test]
    fn missing_terminator_runs_to_end_of_block() {
        assert_eq!(extract("SUMMARY:Standup", "SUMMARY:", "\n").unwrap(), "Standup");
    }

    #[test]
    fn trims_carriage_returns() {
        assert_eq!(
            extract("SUMMARY:Standup\r\nUID:x\r\n", "SUMMARY:", "\n").unwrap(),
            "Standup"
        );
    }

    #[test]
    fn marker_at_end_captures_empty_value() {
        assert_eq!(extract("DESCRIPTION:\nUID:x\n", "DESCRIPTION:", "\n").unwrap(), "");
    }

    #[test]
    fn fallbacks_are_first_non_empty_wins() {
        let block = "DTSTART;VALUE=DATE:20190406\n";
        let markers = [
            ("DTSTART;TZID=Europe/London:", "\n"),
            ("DTSTART:", "\n"),
            ("DTSTART;VALUE=DATE:", "\n"),
        ];
        assert_eq!(extract_first(block, &markers).unwrap(), "20190406");

        let block = "DTSTART:20190406T090000Z\nDTSTART;VALUE=DATE:20190406\n";
        assert_eq!(extract_first(block, &markers).unwrap(), "20190406T090000Z");
    }

    #[test]
    fn empty_capture_does_not_stop_the_fallback_walk() {
        let block = "DTSTART:\nDTSTART;VALUE=DATE:20190406\n";
        let markers = [("DTSTART:", "\n"), ("DTSTART;VALUE=DATE:", "\n")];
        assert_eq!(extract_first(block, &markers).unwrap(), "20190406");
    }
}
