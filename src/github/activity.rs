//! Normalised activity records produced by the GitHub fetchers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle event that produced an activity record's timestamp.
///
/// Only `Created`, `Updated`, `Closed`, and `Committed` are produced by the
/// fetchers. The remaining variants keep the vocabulary of the prompt stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The issue or pull request was opened.
    Created,
    /// The issue or pull request was last edited or commented on.
    Updated,
    /// The issue or pull request was closed.
    Closed,
    /// The issue or pull request was reopened.
    Reopened,
    /// The pull request was merged.
    Merged,
    /// A comment was posted.
    Commented,
    /// A commit was authored.
    Committed,
}

impl Action {
    /// Lowercase label used in serialised output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Closed => "closed",
            Self::Reopened => "reopened",
            Self::Merged => "merged",
            Self::Commented => "commented",
            Self::Committed => "committed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Human-readable `owner/name` repository identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryName(String);

impl RepositoryName {
    /// Wraps an identifier that is already in `owner/name` form.
    #[must_use]
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    /// Derives the identifier from the last two path segments of a URL.
    ///
    /// `https://api.github.com/repos/tweag/chainsail` becomes
    /// `tweag/chainsail`. Feeding the result back in yields the same value.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let mut segments = url.trim_end_matches('/').rsplit('/');
        let name = segments.next().unwrap_or_default();
        Self(
            segments
                .next()
                .map_or_else(|| name.to_owned(), |owner| format!("{owner}/{name}")),
        )
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// One unit of work: an issue, a pull request, or a commit.
///
/// Records carry no identity beyond their fields and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// When the resolved action happened, in UTC.
    pub timestamp: DateTime<Utc>,
    /// Issue or pull request body, or the full commit message.
    pub text: String,
    /// Repository the work happened in.
    pub repository: RepositoryName,
    /// Lifecycle event the timestamp refers to.
    pub action: Action,
}
