//! GitHub activity intake.
//!
//! This module queries the GitHub search API for the issues, pull requests,
//! and commits a user produced within a date range. The blocking
//! [`SearchClient`] drains paginated results, the [`gateway`] maps raw items
//! into [`ActivityRecord`]s, and [`ActivityIntake`] concatenates the three
//! sources in a fixed order.

pub mod action;
pub mod activity;
pub mod client;
pub mod date_range;
pub mod gateway;
pub mod identity;
pub mod intake;
pub mod models;
pub mod pagination;
pub mod query;
pub mod rate_limit;

pub use action::{EPOCH_SENTINEL, LatestAction, parse_timestamp, resolve_latest_action};
pub use activity::{Action, ActivityRecord, RepositoryName};
pub use client::{SearchClient, SearchClientConfig, SearchResource};
pub use date_range::{DateRange, to_github_datetime};
pub use gateway::{ActivityGateway, SearchGateway};
pub use identity::{GitHubHandle, PersonalAccessToken};
pub use intake::{ActivityIntake, fetch_comments};
pub use pagination::PageLinks;
pub use query::{IssueKind, SearchQuery};
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockActivityGateway;
