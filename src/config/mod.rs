//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.daigest.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `DAIGEST_GITHUB_HANDLE`, `DAIGEST_TOKEN`,
//!    and so on, plus the legacy `GITHUB_TOKEN` and
//!    `AWS_BEARER_TOKEN_BEDROCK` fallbacks
//! 4. **Command-line arguments** – `--github-handle`/`-g`, `--email`/`-e`, ...
//!
//! # Configuration File
//!
//! ```toml
//! github_handle = "alice"
//! email = "alice@example.com"
//! calendar = "calendar.ics"
//! model = "claude3"
//! calendar_cache = ".daigest-calendar.json"
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8Path;
use chrono::{Days, NaiveDate};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::ai::{BedrockConfig, ModelProvider, regional_endpoint};
use crate::calendar::CalendarCache;
use crate::error::DigestError;
use crate::github::client::{DEFAULT_API_BASE, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE};
use crate::github::{DateRange, GitHubHandle, PersonalAccessToken, SearchClientConfig};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_LOOKBACK_DAYS: u64 = 7;
const DEFAULT_MODEL_TIMEOUT_SECONDS: u64 = 120;
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Legacy variable consulted when no token is configured.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Variable consulted when no Bedrock API key is configured.
pub const BEDROCK_API_KEY_ENV: &str = "AWS_BEARER_TOKEN_BEDROCK";

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use daigest::DaigestConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DaigestConfig::load().expect("failed to load configuration");
/// let handle = config.require_github_handle().expect("handle required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "DAIGEST",
    discovery(
        dotfile_name = ".daigest.toml",
        config_file_name = "daigest.toml",
        app_name = "daigest"
    )
)]
pub struct DaigestConfig {
    /// GitHub handle whose issues, pull requests, and commits are reported.
    ///
    /// Can be provided via:
    /// - CLI: `--github-handle <HANDLE>` or `-g <HANDLE>`
    /// - Environment: `DAIGEST_GITHUB_HANDLE`
    /// - Config file: `github_handle = "..."`
    #[ortho_config(cli_short = 'g')]
    pub github_handle: Option<String>,

    /// Email address used to detect attendance in calendar events.
    #[ortho_config(cli_short = 'e')]
    pub email: Option<String>,

    /// Path to the calendar `.ics` file.
    #[ortho_config(cli_short = 'c')]
    pub calendar: Option<String>,

    /// First day of the reporting period (`YYYY-MM-DD`), defaulting to seven
    /// days ago.
    #[ortho_config(cli_short = 'l')]
    pub lower_date: Option<String>,

    /// Last day of the reporting period (`YYYY-MM-DD`), defaulting to today.
    #[ortho_config(cli_short = 'u')]
    pub upper_date: Option<String>,

    /// Model used for the summary: `claude3`, `llama2`, or `jurassic2`.
    #[ortho_config(cli_short = 'm')]
    pub model: String,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `DAIGEST_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    ///
    /// Without a token the search API is queried anonymously.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// GitHub API root, useful for GitHub Enterprise or tests.
    #[ortho_config(cli_short = 'A')]
    pub github_api_url: String,

    /// Search results requested per page (1 to 100).
    #[ortho_config(cli_short = 'p')]
    pub per_page: u8,

    /// Pages followed per query before giving up.
    #[ortho_config(cli_short = 'P')]
    pub max_pages: u32,

    /// Optional JSON file caching formatted calendar events between runs.
    #[ortho_config(cli_short = 'C')]
    pub calendar_cache: Option<String>,

    /// AWS region hosting the Bedrock runtime.
    #[ortho_config(cli_short = 'r')]
    pub bedrock_region: String,

    /// Overrides the regional Bedrock runtime endpoint.
    #[ortho_config(cli_short = 'E')]
    pub bedrock_endpoint: Option<String>,

    /// Bedrock API key, falling back to `AWS_BEARER_TOKEN_BEDROCK`.
    #[ortho_config(cli_short = 'k')]
    pub bedrock_api_key: Option<String>,

    /// Timeout for the model invocation, in seconds.
    #[ortho_config(cli_short = 'M')]
    pub model_timeout_seconds: u64,

    /// Timeout for each GitHub request, in seconds.
    #[ortho_config(cli_short = 'T')]
    pub http_timeout_seconds: u64,

    /// Prints the GitHub activity as JSON and exits without reading the
    /// calendar or invoking a model.
    ///
    /// Can be provided via:
    /// - CLI: `--activity-only` / `-a`
    /// - Config file: `activity_only = true`
    ///
    /// Note: `DAIGEST_ACTIVITY_ONLY` is not supported because `ortho_config`
    /// does not load boolean values from the environment.
    #[ortho_config(cli_short = 'a')]
    pub activity_only: bool,

    /// Prints the rendered prompt instead of invoking a model.
    ///
    /// Can be provided via:
    /// - CLI: `--dry-run` / `-n`
    /// - Config file: `dry_run = true`
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,
}

impl Default for DaigestConfig {
    fn default() -> Self {
        Self {
            github_handle: None,
            email: None,
            calendar: None,
            lower_date: None,
            upper_date: None,
            model: ModelProvider::default().name().to_owned(),
            token: None,
            github_api_url: DEFAULT_API_BASE.to_owned(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            calendar_cache: None,
            bedrock_region: crate::ai::bedrock::DEFAULT_REGION.to_owned(),
            bedrock_endpoint: None,
            bedrock_api_key: None,
            model_timeout_seconds: DEFAULT_MODEL_TIMEOUT_SECONDS,
            http_timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECONDS,
            activity_only: false,
            dry_run: false,
        }
    }
}

impl DaigestConfig {
    /// Returns the validated GitHub handle.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when the handle is missing or
    /// malformed.
    pub fn require_github_handle(&self) -> Result<GitHubHandle, DigestError> {
        GitHubHandle::new(self.github_handle.as_deref().unwrap_or_default())
    }

    /// Returns the attendee email address.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when no email is configured.
    pub fn require_email(&self) -> Result<&str, DigestError> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or_else(|| DigestError::Configuration {
                message: "email address is required (use --email or -e)".to_owned(),
            })
    }

    /// Returns the calendar file path.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] when no calendar is configured.
    pub fn require_calendar(&self) -> Result<&Utf8Path, DigestError> {
        self.calendar
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(Utf8Path::new)
            .ok_or_else(|| DigestError::Configuration {
                message: "calendar file is required (use --calendar or -c)".to_owned(),
            })
    }

    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// Returns `None` when neither source provides a non-blank value, in which
    /// case the search API is used anonymously.
    #[must_use]
    pub fn resolve_token(&self) -> Option<PersonalAccessToken> {
        self.token
            .clone()
            .or_else(|| env::var(GITHUB_TOKEN_ENV).ok())
            .and_then(PersonalAccessToken::new)
    }

    /// Resolves the Bedrock API key from configuration or
    /// `AWS_BEARER_TOKEN_BEDROCK`.
    #[must_use]
    pub fn resolve_bedrock_api_key(&self) -> Option<String> {
        self.bedrock_api_key
            .clone()
            .or_else(|| env::var(BEDROCK_API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Builds the reporting period, counting back from `today` for missing
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] for malformed dates or a lower
    /// date after the upper date.
    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, DigestError> {
        let lower = match self.lower_date.as_deref() {
            Some(value) => parse_day("lower_date", value)?,
            None => today
                .checked_sub_days(Days::new(DEFAULT_LOOKBACK_DAYS))
                .ok_or_else(|| DigestError::Configuration {
                    message: format!("cannot count back {DEFAULT_LOOKBACK_DAYS} days from {today}"),
                })?,
        };
        let upper = match self.upper_date.as_deref() {
            Some(value) => parse_day("upper_date", value)?,
            None => today,
        };
        DateRange::from_days(lower, upper)
    }

    /// Parses the configured model name.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] for unknown models.
    pub fn model_provider(&self) -> Result<ModelProvider, DigestError> {
        self.model.parse()
    }

    /// Builds the explicit configuration of the GitHub search client.
    #[must_use]
    pub fn search_client_config(&self) -> SearchClientConfig {
        SearchClientConfig::new(self.github_api_url.clone())
            .with_token(self.resolve_token())
            .with_per_page(self.per_page)
            .with_max_pages(self.max_pages)
            .with_timeout(Duration::from_secs(self.http_timeout_seconds))
    }

    /// Builds the Bedrock invoker configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Configuration`] for unknown models.
    pub fn bedrock_config(&self) -> Result<BedrockConfig, DigestError> {
        let endpoint = self
            .bedrock_endpoint
            .clone()
            .unwrap_or_else(|| regional_endpoint(&self.bedrock_region));
        Ok(BedrockConfig::new(
            endpoint,
            self.model_provider()?,
            self.resolve_bedrock_api_key(),
            Duration::from_secs(self.model_timeout_seconds),
        ))
    }

    /// Returns the calendar cache, when one is configured.
    #[must_use]
    pub fn calendar_cache(&self) -> Option<CalendarCache> {
        self.calendar_cache
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(CalendarCache::new)
    }
}

fn parse_day(field: &str, value: &str) -> Result<NaiveDate, DigestError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|error| {
        DigestError::Configuration {
            message: format!("{field} must use the YYYY-MM-DD format, got '{value}': {error}"),
        }
    })
}

#[cfg(test)]
mod tests;
