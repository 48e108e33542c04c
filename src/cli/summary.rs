//! Summary mode: gathers inputs and asks the configured model for a digest.

use std::io;

use daigest::{BedrockModelInvoker, DaigestConfig, DateRange, DigestError, gather_inputs, summarise};

use super::output::{write_status, write_text};

/// Gathers digest inputs and prints either the prompt (`dry_run`) or the
/// model's summary.
///
/// # Errors
///
/// Propagates configuration, calendar, GitHub, model, and output failures.
pub fn run(config: &DaigestConfig, range: &DateRange) -> Result<(), DigestError> {
    // Unknown models fail before any network traffic.
    let bedrock = config.bedrock_config()?;
    let inputs = gather_inputs(config, range)?;
    write_status(&mut io::stderr().lock(), &inputs)?;

    let text = if config.dry_run {
        inputs.prompt()?
    } else {
        summarise(&BedrockModelInvoker::new(bedrock), &inputs)?
    };
    write_text(&mut io::stdout().lock(), &text)
}
