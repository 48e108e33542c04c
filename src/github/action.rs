//! Resolution of the most recent lifecycle event of an issue or pull request.

use chrono::{DateTime, Utc};

use crate::error::DigestError;

use super::activity::Action;
use super::models::ApiIssue;

/// Stand-in for a missing timestamp. It only wins when all three are missing.
pub const EPOCH_SENTINEL: &str = "1970-01-01T00:00:00Z";

/// The action whose timestamp is the latest of an item's three timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestAction {
    /// Which timestamp won.
    pub action: Action,
    /// The winning timestamp exactly as GitHub sent it.
    pub raw_timestamp: String,
    /// The winning timestamp, parsed.
    pub timestamp: DateTime<Utc>,
}

/// Picks the latest of `created_at`, `updated_at`, and `closed_at`.
///
/// Missing, null, or empty fields count as [`EPOCH_SENTINEL`]. Among equal
/// instants the field listed later in created, updated, closed order wins, so
/// `closed` beats `updated`, which beats `created`.
///
/// # Errors
///
/// Returns [`DigestError::Parse`] when a present timestamp is not valid
/// RFC 3339.
pub fn resolve_latest_action(item: &ApiIssue) -> Result<LatestAction, DigestError> {
    let candidates = [
        (Action::Created, item.created_at.as_deref()),
        (Action::Updated, item.updated_at.as_deref()),
        (Action::Closed, item.closed_at.as_deref()),
    ];

    let mut parsed = Vec::with_capacity(candidates.len());
    for (action, raw) in candidates {
        let value = raw.filter(|text| !text.is_empty()).unwrap_or(EPOCH_SENTINEL);
        parsed.push(LatestAction {
            action,
            raw_timestamp: value.to_owned(),
            timestamp: parse_timestamp(value)?,
        });
    }

    // `max_by_key` returns the last of several equal maxima.
    parsed
        .into_iter()
        .max_by_key(|candidate| candidate.timestamp)
        .ok_or_else(|| DigestError::Parse {
            message: "no timestamp candidates".to_owned(),
        })
}

/// Parses an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`DigestError::Parse`] when `raw` is not valid RFC 3339.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DigestError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|error| DigestError::Parse {
            message: format!("invalid timestamp '{raw}': {error}"),
        })
}
