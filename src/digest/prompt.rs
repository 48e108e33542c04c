//! Prompt construction using Jinja2-compatible templates.
//!
//! The template receives two variables:
//! - `calendar_data`: formatted calendar events joined by newlines
//! - `github_data`: activity records serialised as a JSON array

use minijinja::{Environment, context};

use crate::error::DigestError;
use crate::github::ActivityRecord;

/// Default instructions sent to the model.
pub const PROMPT_TEMPLATE: &str = r"Summarize the events in the calendar and my work on GitHub and tell me what I did during the covered period of time.
If the event has a description, include a summary.
Include attendees names.
If the event is lunch, do not include it.
For GitHub issues, pull requests, and commits, don't include the full text, description, or commit message,
but summarize it if it is longer than two sentences.

Calendar events:
```
{{ calendar_data }}
```

These are GitHub issues, pull requests and commits I worked on, in a JSON format:
```
{{ github_data }}
```
";

/// Serialises activity records the way the prompt embeds them.
///
/// # Errors
///
/// Returns [`DigestError::Parse`] if a record cannot be encoded.
pub fn activity_json(records: &[ActivityRecord]) -> Result<String, DigestError> {
    serde_json::to_string(records).map_err(|error| DigestError::Parse {
        message: format!("failed to encode GitHub activity: {error}"),
    })
}

/// Renders [`PROMPT_TEMPLATE`] for the given events and records.
///
/// # Errors
///
/// Returns [`DigestError::Configuration`] if the template fails to render
/// and [`DigestError::Parse`] if the records cannot be encoded.
pub fn render_prompt(
    calendar_events: &[String],
    records: &[ActivityRecord],
) -> Result<String, DigestError> {
    render_with_template(PROMPT_TEMPLATE, calendar_events, records)
}

/// Renders `template_content` with the same variables as [`render_prompt`].
fn render_with_template(
    template_content: &str,
    calendar_events: &[String],
    records: &[ActivityRecord],
) -> Result<String, DigestError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.add_template("prompt", template_content)
        .map_err(|e| DigestError::Configuration {
            message: format!("invalid prompt template: {e}"),
        })?;

    let ctx = context! {
        calendar_data => calendar_events.join("\n"),
        github_data => activity_json(records)?,
    };

    let tmpl = env.get_template("prompt").map_err(|e| DigestError::Configuration {
        message: format!("failed to retrieve prompt template: {e}"),
    })?;
    tmpl.render(ctx).map_err(|e| DigestError::Configuration {
        message: format!("prompt rendering failed: {e}"),
    })
}
