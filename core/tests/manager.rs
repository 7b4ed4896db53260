// SPDX-FileCopyrightText: 2026 icalq contributors
//
// SPDX-License-Identifier: Apache-2.0

use icalq_core::{RetrieveError, load_from_path, load_from_url, parse};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCUMENT: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:standup@example.com\r\n\
DTSTART:20190617T090000Z\r\n\
DTEND:20190617T100000Z\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

#[test]
fn parse_never_fails_on_garbage() {
    assert!(parse("not an ics document at all").events().is_empty());

    // A bare marker still yields an event, with every field degraded.
    let calendar = parse("BEGIN:VEVENT\n%%%garbage%%%\n");
    assert_eq!(calendar.events().len(), 1);
    assert!(calendar.events()[0].start.is_none());
    assert!(calendar.events()[0].uid.is_empty());
}

#[tokio::test]
async fn loads_a_calendar_from_a_local_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.ics");
    std::fs::write(&path, DOCUMENT).unwrap();

    // Act
    let calendar = load_from_path(&path).await.unwrap();

    // Assert
    assert_eq!(calendar.events().len(), 1);
    assert_eq!(calendar.events()[0].summary, "Standup");
}

#[tokio::test]
async fn missing_file_surfaces_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.ics");

    let err = load_from_path(&missing).await.unwrap_err();
    assert!(matches!(err, RetrieveError::Io(_)));
}

#[tokio::test]
async fn loads_a_calendar_from_a_url() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar.ics"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DOCUMENT))
        .mount(&server)
        .await;

    // Act
    let calendar = load_from_url(&format!("{}/calendar.ics", server.uri())).await.unwrap();

    // Assert
    assert_eq!(calendar.events().len(), 1);
    assert_eq!(calendar.events()[0].uid, "standup@example.com");
}

#[tokio::test]
async fn http_error_status_surfaces_and_yields_no_calendar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calendar.ics"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = load_from_url(&format!("{}/calendar.ics", server.uri())).await.unwrap_err();
    assert!(matches!(err, RetrieveError::Http(_)));
}
