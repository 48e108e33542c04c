//! On-disk cache of formatted calendar events.
//!
//! The cache is a single JSON document holding the formatted events for one
//! `(range, email)` key. A request with a different key ignores the cached
//! events and overwrites the file once fresh ones are formatted.

use std::fs;
use std::io::ErrorKind;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::DigestError;
use crate::github::DateRange;

use super::format::format_events;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CacheEntry {
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
    email: String,
    events: Vec<String>,
}

impl CacheEntry {
    fn matches(&self, range: &DateRange, email: &str) -> bool {
        self.lower == range.lower()
            && self.upper == range.upper()
            && self.email.eq_ignore_ascii_case(email)
    }
}

/// JSON file caching the formatted events of one calendar query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCache {
    path: Utf8PathBuf,
}

impl CalendarCache {
    /// Cache stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the cached events when the file exists and was written for the
    /// same range and email.
    ///
    /// A cache file that cannot be decoded is treated as a miss.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Io`] when the file exists but cannot be read.
    pub fn load(&self, range: &DateRange, email: &str) -> Result<Option<Vec<String>>, DigestError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path, "calendar cache absent");
                return Ok(None);
            }
            Err(error) => {
                return Err(DigestError::io(
                    &format!("failed to read calendar cache {}", self.path),
                    &error,
                ));
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(error) => {
                warn!(path = %self.path, %error, "ignoring unreadable calendar cache");
                return Ok(None);
            }
        };

        if entry.matches(range, email) {
            info!(path = %self.path, events = entry.events.len(), "calendar cache hit");
            Ok(Some(entry.events))
        } else {
            debug!(path = %self.path, "calendar cache written for another range or email");
            Ok(None)
        }
    }

    /// Replaces the cache contents with `events` for the given key.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Io`] when the file cannot be written and
    /// [`DigestError::Parse`] if the entry cannot be encoded.
    pub fn store(
        &self,
        range: &DateRange,
        email: &str,
        events: &[String],
    ) -> Result<(), DigestError> {
        let entry = CacheEntry {
            lower: range.lower(),
            upper: range.upper(),
            email: email.to_owned(),
            events: events.to_vec(),
        };
        let encoded = serde_json::to_string_pretty(&entry).map_err(|error| DigestError::Parse {
            message: format!("failed to encode calendar cache: {error}"),
        })?;
        fs::write(&self.path, encoded).map_err(|error| {
            DigestError::io(
                &format!("failed to write calendar cache {}", self.path),
                &error,
            )
        })
    }
}

/// Formats the attended events of the calendar at `calendar_path`, reusing
/// `cache` when it holds events for the same range and email.
///
/// # Errors
///
/// Returns [`DigestError::Io`] when the calendar or cache cannot be read or
/// written and [`DigestError::Calendar`] when the calendar is malformed.
pub fn load_calendar_events(
    calendar_path: &Utf8Path,
    range: &DateRange,
    email: &str,
    cache: Option<&CalendarCache>,
) -> Result<Vec<String>, DigestError> {
    if let Some(cached) = cache
        .map(|store| store.load(range, email))
        .transpose()?
        .flatten()
    {
        return Ok(cached);
    }

    let ics_text = fs::read_to_string(calendar_path).map_err(|error| {
        DigestError::io(&format!("failed to read calendar {calendar_path}"), &error)
    })?;
    let events = format_events(&ics_text, range, email)?;

    if let Some(store) = cache {
        store.store(range, email, &events)?;
        debug!(path = %store.path(), events = events.len(), "calendar cache refreshed");
    }
    Ok(events)
}
