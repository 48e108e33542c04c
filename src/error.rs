//! Error types shared by the activity fetchers, calendar formatter, and model
//! invokers.

use thiserror::Error;

use crate::github::rate_limit::RateLimitInfo;

/// Errors surfaced while gathering activity or generating a digest.
///
/// No variant is recovered locally: every failure propagates to the caller and
/// terminates the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DigestError {
    /// The search API answered with a non-success status.
    #[error("GitHub API request failed with status {status}: {body}")]
    Http {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body returned with the failure.
        body: String,
    },

    /// The search API rejected the request because the quota is exhausted.
    #[error("GitHub API rate limit exceeded (status {status}): {message}")]
    RateLimitExceeded {
        /// HTTP status code returned by the API.
        status: u16,
        /// Rate limit headers captured from the failed response.
        rate_limit: Option<RateLimitInfo>,
        /// Response body, with the reset time appended when known.
        message: String,
    },

    /// Networking failed before a response was received.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response or timestamp could not be parsed.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the malformed input.
        message: String,
    },

    /// A URL could not be parsed or extended.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration was missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A `next` link was still present after the page bound was reached.
    #[error("pagination stopped after {pages} pages but the API still advertised a next page")]
    PaginationLimit {
        /// Number of pages fetched before giving up.
        pages: u32,
    },

    /// The calendar file could not be parsed.
    #[error("calendar error: {message}")]
    Calendar {
        /// Details about the calendar failure.
        message: String,
    },

    /// The language model invocation failed or returned no text.
    #[error("model invocation failed: {message}")]
    Model {
        /// Details about the model failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl DigestError {
    /// Builds a [`DigestError::Io`] from a standard I/O error.
    #[must_use]
    pub fn io(context: &str, error: &std::io::Error) -> Self {
        Self::Io {
            message: format!("{context}: {error}"),
        }
    }
}
