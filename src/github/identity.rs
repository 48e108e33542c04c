//! Identity wrappers for GitHub handles and access tokens.

use std::fmt;

use crate::error::DigestError;

/// GitHub login whose activity is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubHandle(String);

impl GitHubHandle {
    /// Validates that the handle is non-empty and contains no whitespace.
    ///
    /// A leading `@` is accepted and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] for blank handles or handles
    /// containing whitespace, which would split the search query.
    pub fn new(handle: impl AsRef<str>) -> Result<Self, DigestError> {
        let trimmed = handle.as_ref().trim();
        let value = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if value.is_empty() {
            return Err(DigestError::Configuration {
                message: "GitHub handle is required (use --github-handle or -g)".to_owned(),
            });
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DigestError::Configuration {
                message: format!("GitHub handle '{value}' must not contain whitespace"),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the handle value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GitHubHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Trims whitespace and returns `None` for blank input, so an empty
    /// `GITHUB_TOKEN` degrades to unauthenticated access.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}
