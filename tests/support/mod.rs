//! Shared test utilities.

use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

pub mod runtime;

/// Result type for BDD test steps.
pub type StepResult = Result<(), Box<dyn std::error::Error>>;

/// Issue search qualifiers for `alice` during the first week of 2024.
pub const ALICE_ISSUES_QUERY: &str =
    "is:issue author:alice created:2024-01-01T00:00:00Z..2024-01-08T23:59:59Z";
/// Pull request search qualifiers for `alice` during the first week of 2024.
pub const ALICE_PULLS_QUERY: &str =
    "is:pull-request author:alice created:2024-01-01T00:00:00Z..2024-01-08T23:59:59Z";
/// Commit search qualifiers for `alice` during the first week of 2024.
pub const ALICE_COMMITS_QUERY: &str =
    "author:alice committer:alice author-date:2024-01-01T00:00:00Z..2024-01-08T23:59:59Z";

/// Calendar with one meeting attended by `alice@example.com` during the first
/// week of 2024 and one declined invitation.
pub const ALICE_CALENDAR: &str = concat!(
    "BEGIN:VCALENDAR\r\n",
    "VERSION:2.0\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:sync-1\r\n",
    "SUMMARY:Sampler sync\r\n",
    "DTSTART:20240102T100000Z\r\n",
    "DTEND:20240102T110000Z\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=ACCEPTED:mailto:alice@example.com\r\n",
    "END:VEVENT\r\n",
    "BEGIN:VEVENT\r\n",
    "UID:review-2\r\n",
    "SUMMARY:Declined review\r\n",
    "DTSTART:20240103T090000Z\r\n",
    "DTEND:20240103T100000Z\r\n",
    "ATTENDEE;CN=Alice Doe;PARTSTAT=DECLINED:mailto:alice@example.com\r\n",
    "END:VEVENT\r\n",
    "END:VCALENDAR\r\n",
);

/// Creates a temporary directory for calendar and cache files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Wraps `items` in a search response body.
pub fn search_page(items: Vec<Value>) -> Value {
    json!({ "total_count": items.len(), "incomplete_results": false, "items": items })
}

/// Builds an issue search item owned by `tweag/chainsail`.
pub fn issue_item(body: &str, created_at: &str, closed_at: Option<&str>) -> Value {
    json!({
        "body": body,
        "repository_url": "https://api.github.com/repos/tweag/chainsail",
        "created_at": created_at,
        "updated_at": null,
        "closed_at": closed_at
    })
}

/// Builds a commit search item owned by `tweag/chainsail`.
pub fn commit_item(message: &str, date: &str) -> Value {
    json!({
        "commit": { "author": { "date": date }, "message": message },
        "repository": { "full_name": "tweag/chainsail" }
    })
}

/// Mock answering search `resource` for `query` with a single page of `items`.
pub fn search_mock(resource: &str, query: &str, items: Vec<Value>) -> Mock {
    Mock::given(method("GET"))
        .and(path(format!("/search/{resource}")))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(items)))
}
