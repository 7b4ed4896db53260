// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar domain layer: occurrence evaluation, per-day lookup and
//! retrieval on top of the [`icalq_ical`] document parser.

#![warn(
    missing_debug_implementations,
    unsafe_code,
    unused_qualifications,
    clippy::dbg_macro
)]

pub mod calendar;
pub mod manager;
pub mod occurrence;
pub mod recurrence;

pub use calendar::Calendar;
pub use manager::{RetrieveError, load_from_path, load_from_url, parse};
pub use occurrence::{Occurrence, occurrence_on};
pub use recurrence::Occurs;

pub use icalq_ical as ical;
