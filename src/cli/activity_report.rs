//! Activity-only mode: prints the fetched GitHub records as JSON.

use std::io;

use daigest::{DaigestConfig, DateRange, DigestError, gather_activity};

use super::output::write_activity_json;

/// Fetches the configured handle's activity and writes it to stdout.
///
/// # Errors
///
/// Propagates configuration, GitHub, and output failures.
pub fn run(config: &DaigestConfig, range: &DateRange) -> Result<(), DigestError> {
    let records = gather_activity(config, range)?;
    write_activity_json(&mut io::stdout().lock(), &records)
}
