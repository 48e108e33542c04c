//! Assembly of the weekly digest from calendar and GitHub inputs.

pub mod gather;
pub mod prompt;

use tracing::info;

use crate::ai::ModelInvoker;
use crate::error::DigestError;
use crate::github::ActivityRecord;

pub use gather::{gather_activity, gather_inputs};
pub use prompt::{PROMPT_TEMPLATE, activity_json, render_prompt};

/// Everything gathered for one reporting period.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestInputs {
    /// Formatted calendar events.
    pub calendar_events: Vec<String>,
    /// GitHub activity in intake order.
    pub activity: Vec<ActivityRecord>,
}

impl DigestInputs {
    /// Bundles gathered inputs.
    #[must_use]
    pub const fn new(calendar_events: Vec<String>, activity: Vec<ActivityRecord>) -> Self {
        Self {
            calendar_events,
            activity,
        }
    }

    /// One-line summary of what was gathered, e.g.
    /// `Got 3 calendar event(s) and 12 GitHub event(s).`
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "Got {} calendar event(s) and {} GitHub event(s).",
            self.calendar_events.len(),
            self.activity.len()
        )
    }

    /// Renders the model prompt.
    ///
    /// # Errors
    ///
    /// Propagates template and encoding failures from [`render_prompt`].
    pub fn prompt(&self) -> Result<String, DigestError> {
        render_prompt(&self.calendar_events, &self.activity)
    }
}

/// Asks `invoker` to summarise `inputs`.
///
/// # Errors
///
/// Propagates prompt rendering failures and model errors.
pub fn summarise(invoker: &dyn ModelInvoker, inputs: &DigestInputs) -> Result<String, DigestError> {
    let prompt = inputs.prompt()?;
    info!(
        calendar_events = inputs.calendar_events.len(),
        activity = inputs.activity.len(),
        "requesting digest summary"
    );
    invoker.invoke(&prompt)
}
