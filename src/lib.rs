//! Daigest library crate producing a weekly work digest.
//!
//! The library collects a person's GitHub issues, pull requests, and commits
//! through the search API, formats the calendar events they attended, and
//! asks a hosted language model to summarise both. Errors are surfaced as a
//! single [`DigestError`] that the CLI can display directly.

pub mod ai;
pub mod calendar;
pub mod config;
pub mod digest;
pub mod error;
pub mod github;

pub use ai::{BedrockConfig, BedrockModelInvoker, ModelInvoker, ModelProvider};
pub use config::DaigestConfig;
pub use digest::{DigestInputs, gather_activity, gather_inputs, summarise};
pub use error::DigestError;
pub use github::{
    Action, ActivityRecord, DateRange, GitHubHandle, PersonalAccessToken, RepositoryName,
    SearchClientConfig, fetch_comments,
};
