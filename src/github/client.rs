//! Blocking pagination client for the GitHub search API.
//!
//! The client issues a GET with the query string, follows `rel="next"` links
//! from the `link` header until none remain, and returns every item it
//! received in page order. Requests run one after another on the calling
//! thread.

use std::time::Duration;

use http::header::{ACCEPT, LINK};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::DigestError;

use super::identity::PersonalAccessToken;
use super::models::SearchPage;
use super::pagination::PageLinks;
use super::query::SearchQuery;
use super::rate_limit::RateLimitInfo;

/// Public GitHub API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
/// Media type pinning the REST API version.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
/// Items requested per page.
pub const DEFAULT_PER_PAGE: u8 = 30;
/// Upper bound on pages followed for a single query.
pub const DEFAULT_MAX_PAGES: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Search collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResource {
    /// `search/issues`, serving issues and pull requests.
    Issues,
    /// `search/commits`.
    Commits,
}

impl SearchResource {
    /// Path below the API root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Issues => "search/issues",
            Self::Commits => "search/commits",
        }
    }
}

/// Explicit configuration for [`SearchClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchClientConfig {
    /// API root, e.g. `https://api.github.com`.
    pub api_base: String,
    /// Token sent as bearer authentication when present.
    pub token: Option<PersonalAccessToken>,
    /// Items requested per page (1..=100).
    pub per_page: u8,
    /// Pages followed before giving up with [`DigestError::PaginationLimit`].
    pub max_pages: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token: None,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchClientConfig {
    /// Configuration for `api_base` with default paging and no token.
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    /// Sets the token.
    #[must_use]
    pub fn with_token(mut self, token: Option<PersonalAccessToken>) -> Self {
        self.token = token;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u8) -> Self {
        self.per_page = per_page;
        self
    }

    /// Sets the page bound.
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn validate(&self) -> Result<(), DigestError> {
        if self.per_page == 0 || self.per_page > 100 {
            return Err(DigestError::Configuration {
                message: format!("per_page must be between 1 and 100, got {}", self.per_page),
            });
        }
        if self.max_pages == 0 {
            return Err(DigestError::Configuration {
                message: "max_pages must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

/// Blocking client that drains paginated search results.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: SearchClientConfig,
    http: Client,
}

impl SearchClient {
    /// Builds a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] for out-of-range paging values
    /// or when the HTTP client cannot be constructed.
    pub fn new(config: SearchClientConfig) -> Result<Self, DigestError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| DigestError::Configuration {
                message: format!("failed to configure GitHub HTTP client: {error}"),
            })?;
        Ok(Self { config, http })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &SearchClientConfig {
        &self.config
    }

    /// Runs `query` against `resource` and returns the items of every page.
    ///
    /// The first request targets `<api_base>/<resource>?q=<query>&per_page=N`;
    /// later requests follow the `next` links verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Http`] or [`DigestError::RateLimitExceeded`] for
    /// a non-success status, [`DigestError::Network`] when a request cannot
    /// be sent, [`DigestError::Parse`] for malformed bodies, and
    /// [`DigestError::PaginationLimit`] when `next` links outlast
    /// `max_pages`.
    pub fn send_query<T: DeserializeOwned>(
        &self,
        resource: SearchResource,
        query: &SearchQuery,
    ) -> Result<Vec<T>, DigestError> {
        let first_url = self.query_url(resource, query)?;
        let mut items = Vec::new();
        let mut pages = 0_u32;
        let mut next_url = Some(first_url.to_string());

        while let Some(url) = next_url {
            if pages >= self.config.max_pages {
                return Err(DigestError::PaginationLimit { pages });
            }
            pages += 1;

            debug!(%url, page = pages, resource = resource.path(), "requesting search page");
            let (page, links) = self.fetch_page::<T>(&url)?;
            debug!(
                items = page.items.len(),
                last = ?links.last(),
                "received search page"
            );

            items.extend(page.items);
            next_url = links.next().map(ToOwned::to_owned);
        }

        Ok(items)
    }

    fn query_url(&self, resource: SearchResource, query: &SearchQuery) -> Result<Url, DigestError> {
        let endpoint = format!(
            "{}/{}",
            self.config.api_base.trim_end_matches('/'),
            resource.path()
        );
        let mut url = Url::parse(&endpoint)
            .map_err(|error| DigestError::InvalidUrl(format!("{endpoint}: {error}")))?;
        url.query_pairs_mut()
            .append_pair("q", &query.to_string())
            .append_pair("per_page", &self.config.per_page.to_string());
        Ok(url)
    }

    fn fetch_page<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<(SearchPage<T>, PageLinks), DigestError> {
        let mut request = self.http.get(url).header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token.value());
        }

        let response = request.send().map_err(|error| DigestError::Network {
            message: format!("GET {url} failed: {error}"),
        })?;

        if !response.status().is_success() {
            return Err(map_http_error(response));
        }

        let links = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(PageLinks::parse)
            .unwrap_or_default();

        let body = response.text().map_err(|error| DigestError::Network {
            message: format!("reading response from {url} failed: {error}"),
        })?;
        let page = serde_json::from_str(&body).map_err(|error| DigestError::Parse {
            message: format!("unexpected search response from {url}: {error}"),
        })?;

        Ok((page, links))
    }
}

fn map_http_error(response: Response) -> DigestError {
    let status = response.status().as_u16();
    let rate_limit = RateLimitInfo::from_headers(response.headers());
    let body = response
        .text()
        .unwrap_or_else(|_| "(failed to read error response body)".to_owned());

    match rate_limit {
        Some(info) if info.is_exhausted() => DigestError::RateLimitExceeded {
            status,
            rate_limit: Some(info),
            message: format!(
                "{body} (all {} requests used, resets at {})",
                info.limit(),
                info.reset_at()
            ),
        },
        _ => DigestError::Http { status, body },
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
