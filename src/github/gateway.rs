//! Resource fetchers turning search results into activity records.
//!
//! [`ActivityGateway`] is the seam the aggregator depends on, so tests can
//! swap in stub fetchers. [`SearchGateway`] implements it on top of the
//! blocking [`SearchClient`].

use tracing::info;

use crate::error::DigestError;

use super::action::{parse_timestamp, resolve_latest_action};
use super::activity::{Action, ActivityRecord, RepositoryName};
use super::client::{SearchClient, SearchResource};
use super::date_range::DateRange;
use super::identity::GitHubHandle;
use super::models::{ApiCommitItem, ApiIssue};
use super::query::{IssueKind, SearchQuery};

/// Source of activity records for one GitHub handle.
#[cfg_attr(test, mockall::automock)]
pub trait ActivityGateway {
    /// Fetch issues or pull requests opened by `handle` within `range`.
    ///
    /// # Errors
    ///
    /// Returns a [`DigestError`] when the search or a timestamp fails.
    fn issues(
        &self,
        kind: IssueKind,
        handle: &GitHubHandle,
        range: &DateRange,
    ) -> Result<Vec<ActivityRecord>, DigestError>;

    /// Fetch commits authored and committed by `handle` within `range`.
    ///
    /// # Errors
    ///
    /// Returns a [`DigestError`] when the search or a timestamp fails.
    fn commits(
        &self,
        handle: &GitHubHandle,
        range: &DateRange,
    ) -> Result<Vec<ActivityRecord>, DigestError>;
}

/// Gateway backed by the GitHub search API.
#[derive(Debug, Clone)]
pub struct SearchGateway {
    client: SearchClient,
}

impl SearchGateway {
    /// Wraps a configured search client.
    #[must_use]
    pub const fn new(client: SearchClient) -> Self {
        Self { client }
    }
}

impl ActivityGateway for SearchGateway {
    fn issues(
        &self,
        kind: IssueKind,
        handle: &GitHubHandle,
        range: &DateRange,
    ) -> Result<Vec<ActivityRecord>, DigestError> {
        let query = SearchQuery::issues(kind, handle.as_str(), range);
        let items: Vec<ApiIssue> = self.client.send_query(SearchResource::Issues, &query)?;
        let records = items
            .iter()
            .map(issue_record)
            .collect::<Result<Vec<_>, _>>()?;
        info!(kind = kind.label(), count = records.len(), %handle, "fetched GitHub activity");
        Ok(records)
    }

    fn commits(
        &self,
        handle: &GitHubHandle,
        range: &DateRange,
    ) -> Result<Vec<ActivityRecord>, DigestError> {
        let query = SearchQuery::commits(handle.as_str(), range);
        let items: Vec<ApiCommitItem> = self.client.send_query(SearchResource::Commits, &query)?;
        let records = items
            .into_iter()
            .map(commit_record)
            .collect::<Result<Vec<_>, _>>()?;
        info!(kind = "commits", count = records.len(), %handle, "fetched GitHub activity");
        Ok(records)
    }
}

/// Maps an issue or pull request onto a record labelled with its latest
/// action.
///
/// # Errors
///
/// Returns [`DigestError::Parse`] when one of the timestamps is malformed.
pub fn issue_record(item: &ApiIssue) -> Result<ActivityRecord, DigestError> {
    let latest = resolve_latest_action(item)?;
    Ok(ActivityRecord {
        timestamp: latest.timestamp,
        text: item.body.clone().unwrap_or_default(),
        repository: RepositoryName::from_url(&item.repository_url),
        action: latest.action,
    })
}

/// Maps a commit onto a `committed` record dated by its author date.
///
/// # Errors
///
/// Returns [`DigestError::Parse`] when the author date is malformed.
pub fn commit_record(item: ApiCommitItem) -> Result<ActivityRecord, DigestError> {
    Ok(ActivityRecord {
        timestamp: parse_timestamp(&item.commit.author.date)?,
        text: item.commit.message,
        repository: RepositoryName::new(item.repository.full_name),
        action: Action::Committed,
    })
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
