//! Search query construction for the issue and commit search endpoints.

use std::fmt;

use super::date_range::DateRange;

/// Issue-search subtypes. Pull requests are issues in the GitHub data model,
/// so both kinds are served by the same endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Plain issues (`is:issue`).
    Issue,
    /// Pull requests (`is:pull-request`).
    PullRequest,
}

impl IssueKind {
    /// Search qualifier selecting this kind.
    #[must_use]
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::Issue => "is:issue",
            Self::PullRequest => "is:pull-request",
        }
    }

    /// Short label used in logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issue => "issues",
            Self::PullRequest => "pull requests",
        }
    }
}

/// Ordered list of space-delimited search qualifiers.
///
/// # Example
///
/// ```
/// use daigest::github::query::SearchQuery;
///
/// let query = SearchQuery::new().qualifier("is:issue").author("alice");
/// assert_eq!(query.to_string(), "is:issue author:alice");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    qualifiers: Vec<String>,
}

impl SearchQuery {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            qualifiers: Vec::new(),
        }
    }

    /// Appends a raw qualifier.
    #[must_use]
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifiers.push(qualifier.into());
        self
    }

    /// Appends `author:<handle>`.
    #[must_use]
    pub fn author(self, handle: &str) -> Self {
        self.qualifier(format!("author:{handle}"))
    }

    /// Appends `committer:<handle>`.
    #[must_use]
    pub fn committer(self, handle: &str) -> Self {
        self.qualifier(format!("committer:{handle}"))
    }

    /// Appends a `<field>:<lower>..<upper>` date range.
    #[must_use]
    pub fn date_range(self, field: &str, range: &DateRange) -> Self {
        self.qualifier(range.qualifier(field))
    }

    /// Query for issues or pull requests opened by `handle` within `range`.
    #[must_use]
    pub fn issues(kind: IssueKind, handle: &str, range: &DateRange) -> Self {
        Self::new()
            .qualifier(kind.qualifier())
            .author(handle)
            .date_range("created", range)
    }

    /// Query for commits both authored and committed by `handle` within
    /// `range`.
    #[must_use]
    pub fn commits(handle: &str, range: &DateRange) -> Self {
        Self::new()
            .author(handle)
            .committer(handle)
            .date_range("author-date", range)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.qualifiers.join(" "))
    }
}
