//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use daigest::digest::activity_json;
use daigest::{ActivityRecord, DigestError, DigestInputs};

/// Writes `records` as a single JSON array line.
pub fn write_activity_json<W: Write>(
    writer: &mut W,
    records: &[ActivityRecord],
) -> Result<(), DigestError> {
    let json = activity_json(records)?;
    writeln!(writer, "{json}").map_err(|e| io_error(&e))
}

/// Writes the gathered-inputs status line.
pub fn write_status<W: Write>(writer: &mut W, inputs: &DigestInputs) -> Result<(), DigestError> {
    writeln!(writer, "{}", inputs.status_line()).map_err(|e| io_error(&e))
}

/// Writes `text`, ensuring it ends with a newline.
pub fn write_text<W: Write>(writer: &mut W, text: &str) -> Result<(), DigestError> {
    let result = if text.ends_with('\n') {
        write!(writer, "{text}")
    } else {
        writeln!(writer, "{text}")
    };
    result.map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> DigestError {
    DigestError::io("failed to write output", error)
}
