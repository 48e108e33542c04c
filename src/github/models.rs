//! Deserialisation targets for GitHub search responses.
//!
//! Only the fields the fetchers read are modelled. Required fields fail the
//! parse when absent; nullable ones are `Option`s.

use serde::Deserialize;

/// One page of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage<T> {
    /// Items on this page.
    pub items: Vec<T>,
}

/// Issue or pull request item from `search/issues`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiIssue {
    /// Description markdown; GitHub sends `null` for an empty body.
    #[serde(default)]
    pub body: Option<String>,
    /// API URL of the owning repository, e.g.
    /// `https://api.github.com/repos/tweag/chainsail`.
    pub repository_url: String,
    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Closing timestamp (ISO 8601), `null` while open.
    #[serde(default)]
    pub closed_at: Option<String>,
}

/// Commit item from `search/commits`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCommitItem {
    /// Git-level commit data.
    pub commit: ApiCommit,
    /// Repository the commit belongs to.
    pub repository: ApiRepository,
}

/// Git-level commit data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiCommit {
    /// Author signature.
    pub author: ApiSignature,
    /// Full commit message.
    pub message: String,
}

/// Git author or committer signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiSignature {
    /// Authored date (ISO 8601).
    pub date: String,
}

/// Minimal repository description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiRepository {
    /// `owner/name` identifier.
    pub full_name: String,
}
