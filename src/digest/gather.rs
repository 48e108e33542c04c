//! Collects digest inputs as described by the loaded configuration.

use tracing::debug;

use super::DigestInputs;
use crate::calendar::load_calendar_events;
use crate::config::DaigestConfig;
use crate::error::DigestError;
use crate::github::{ActivityRecord, DateRange, fetch_comments};

/// Fetches the configured handle's GitHub activity within `range`.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] when the handle is missing and
/// otherwise propagates GitHub failures.
pub fn gather_activity(
    config: &DaigestConfig,
    range: &DateRange,
) -> Result<Vec<ActivityRecord>, DigestError> {
    let handle = config.require_github_handle()?;
    fetch_comments(config.search_client_config(), &handle, range)
}

/// Formats the attended calendar events and fetches GitHub activity.
///
/// Every required setting is validated before the calendar is read or the
/// network is touched.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] for missing settings and
/// propagates calendar, cache, and GitHub failures.
pub fn gather_inputs(
    config: &DaigestConfig,
    range: &DateRange,
) -> Result<DigestInputs, DigestError> {
    let handle = config.require_github_handle()?;
    let email = config.require_email()?;
    let calendar_path = config.require_calendar()?;
    let cache = config.calendar_cache();

    let calendar_events = load_calendar_events(calendar_path, range, email, cache.as_ref())?;
    debug!(events = calendar_events.len(), "calendar events formatted");

    let activity = fetch_comments(config.search_client_config(), &handle, range)?;
    Ok(DigestInputs::new(calendar_events, activity))
}
