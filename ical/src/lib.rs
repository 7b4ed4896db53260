// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Lenient parsing of iCalendar (.ics) documents.
//!
//! Real-world ICS exports are messy: folded lines, parameterized properties
//! in half a dozen spellings, attendees with unknown roles, timestamps with
//! and without timezone suffixes. This crate deliberately avoids a grammar
//! and instead scans for property markers, degrading every malformed field
//! to an empty or absent value so that one bad property never loses the rest
//! of the document.

#![warn(
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unused_qualifications,
    clippy::dbg_macro
)]

pub mod attendee;
pub mod event;
pub mod extract;
pub mod instant;
pub mod parser;
pub mod rrule;

pub use crate::attendee::{Attendee, PartStat, Role};
pub use crate::event::{CalendarEvent, RawEventFields};
pub use crate::extract::{extract, extract_first};
pub use crate::instant::{InstantParser, resolve_timezone};
pub use crate::parser::{parse_events, unfold};
pub use crate::rrule::{Frequency, RecurrenceRule};
