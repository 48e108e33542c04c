//! High-level activity intake used by the CLI.

use tracing::debug;

use crate::error::DigestError;

use super::activity::ActivityRecord;
use super::client::{SearchClient, SearchClientConfig};
use super::date_range::DateRange;
use super::gateway::{ActivityGateway, SearchGateway};
use super::identity::GitHubHandle;
use super::query::IssueKind;

/// Aggregates issues, pull requests, and commits using a gateway.
pub struct ActivityIntake<'client, Gateway>
where
    Gateway: ActivityGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ActivityIntake<'client, Gateway>
where
    Gateway: ActivityGateway,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Load every activity record for `handle` within `range`.
    ///
    /// Issues come first, then pull requests, then commits. Each group keeps
    /// the order the API returned it in; nothing is re-sorted or
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from the underlying gateway. No partial
    /// result is returned.
    pub fn fetch_all(
        &self,
        handle: &GitHubHandle,
        range: &DateRange,
    ) -> Result<Vec<ActivityRecord>, DigestError> {
        let mut records = self.client.issues(IssueKind::Issue, handle, range)?;
        records.extend(self.client.issues(IssueKind::PullRequest, handle, range)?);
        records.extend(self.client.commits(handle, range)?);
        debug!(total = records.len(), %handle, "aggregated GitHub activity");
        Ok(records)
    }
}

/// Fetch all GitHub activity for `handle` within `range` against the API
/// described by `config`.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] for invalid client settings and
/// otherwise propagates fetch failures.
pub fn fetch_comments(
    config: SearchClientConfig,
    handle: &GitHubHandle,
    range: &DateRange,
) -> Result<Vec<ActivityRecord>, DigestError> {
    let gateway = SearchGateway::new(SearchClient::new(config)?);
    ActivityIntake::new(&gateway).fetch_all(handle, range)
}
