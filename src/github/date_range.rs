//! Inclusive UTC date ranges used to bound search queries.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DigestError;

/// Format GitHub expects in date qualifiers: UTC, whole seconds, `Z` suffix.
const GITHUB_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Inclusive range of instants to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
}

impl DateRange {
    /// Creates a range, rejecting a lower bound after the upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when `lower > upper`.
    pub fn new(lower: DateTime<Utc>, upper: DateTime<Utc>) -> Result<Self, DigestError> {
        if lower > upper {
            return Err(DigestError::Configuration {
                message: format!(
                    "lower date {} is after upper date {}",
                    to_github_datetime(lower),
                    to_github_datetime(upper)
                ),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Covers whole calendar days: from the start of `lower` to the last
    /// second of `upper`.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when `lower` is after `upper`.
    pub fn from_days(lower: NaiveDate, upper: NaiveDate) -> Result<Self, DigestError> {
        let (Some(start), Some(end)) = (lower.and_hms_opt(0, 0, 0), upper.and_hms_opt(23, 59, 59))
        else {
            return Err(DigestError::Configuration {
                message: format!("cannot build a day range from {lower} to {upper}"),
            });
        };
        Self::new(start.and_utc(), end.and_utc())
    }

    /// Start of the range.
    #[must_use]
    pub const fn lower(&self) -> DateTime<Utc> {
        self.lower
    }

    /// End of the range.
    #[must_use]
    pub const fn upper(&self) -> DateTime<Utc> {
        self.upper
    }

    /// Returns true when `instant` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.lower <= instant && instant <= self.upper
    }

    /// Renders the range as a search qualifier such as
    /// `created:2024-01-01T00:00:00Z..2024-01-08T00:00:00Z`.
    #[must_use]
    pub fn qualifier(&self, field: &str) -> String {
        format!(
            "{field}:{}..{}",
            to_github_datetime(self.lower),
            to_github_datetime(self.upper)
        )
    }
}

/// Formats an instant the way GitHub's search date qualifiers expect.
#[must_use]
pub fn to_github_datetime(instant: DateTime<Utc>) -> String {
    instant.format(GITHUB_DATETIME_FORMAT).to_string()
}
