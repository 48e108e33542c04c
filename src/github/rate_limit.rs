//! Rate limit information from GitHub API responses.
//!
//! The search API reports its quota through `X-RateLimit-*` headers. The
//! pagination client captures them when a request fails so the error can say
//! how large the quota is and when it resets. Nothing here waits or retries.

use http::HeaderMap;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information extracted from GitHub API response headers.
///
/// # Example
///
/// ```
/// use daigest::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(30, 0, 1700000000);
/// assert!(info.is_exhausted());
/// assert_eq!(info.reset_at(), 1700000000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads the three `X-RateLimit-*` headers.
    ///
    /// Returns `None` unless all of them are present and numeric.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let limit = header_number(headers, LIMIT_HEADER)?;
        let remaining = header_number(headers, REMAINING_HEADER)?;
        let reset_at = header_number(headers, RESET_HEADER)?;
        Some(Self::new(
            u32::try_from(limit).ok()?,
            u32::try_from(remaining).ok()?,
            reset_at,
        ))
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_number(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
