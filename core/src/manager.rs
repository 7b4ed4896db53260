// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Retrieval entry points: parse text, read a file, fetch a URL.

use std::path::Path;

use icalq_ical::parse_events;

use crate::calendar::Calendar;

/// Retrieval failure. The only fatal error class: once text is in hand,
/// parsing always yields a calendar.
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("failed to read calendar file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch calendar: {0}")]
    Http(#[from] reqwest::Error),
}

/// Parse an ICS document into a [`Calendar`]. Infallible; malformed content
/// degrades per event, never the whole document.
pub fn parse(document: &str) -> Calendar {
    let mut calendar = Calendar::new();
    for event in parse_events(document) {
        calendar.add_event(event);
    }
    tracing::debug!(events = calendar.events().len(), "parsed calendar document");
    calendar
}

/// Read and parse a local ICS file.
#[tracing::instrument(skip_all)]
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Calendar, RetrieveError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading calendar from file");
    let document = tokio::fs::read_to_string(path).await?;
    Ok(parse(&document))
}

/// Fetch and parse a remote ICS document. Non-success statuses are errors;
/// a partial calendar is never returned.
#[tracing::instrument(skip_all)]
pub async fn load_from_url(url: &str) -> Result<Calendar, RetrieveError> {
    tracing::debug!(url, "loading calendar from url");
    let document = reqwest::get(url).await?.error_for_status()?.text().await?;
    Ok(parse(&document))
}
