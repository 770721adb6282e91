// src/core/commands/helpers.rs

//! Shared helpers for command input validation and timestamping.

use crate::core::CommandError;
use crate::core::protocol::Request;

/// Verifies that a request attribute's size lies within `[min_size, max_size]`
/// bytes.
///
/// An attribute shorter than `min_size` (including absent, since missing
/// attributes read as empty) is a `402 Missing <name>`; one longer than
/// `max_size` is a `402 <name> is too long`. Runs before any store access in
/// both phases.
pub fn verify_attribute_size(
    request: &Request,
    name: &str,
    min_size: usize,
    max_size: usize,
) -> Result<(), CommandError> {
    let value = request.get(name);
    if value.len() < min_size {
        return Err(CommandError::MissingAttribute(name.to_string()));
    }
    if value.len() > max_size {
        return Err(CommandError::AttributeTooLarge(name.to_string()));
    }
    Ok(())
}

/// Current wall-clock time in microseconds since the Unix epoch, the unit the
/// wire format uses for `createdAt`/`timestamp` attributes.
pub fn now_micros() -> i64 {
    chrono::Utc::now().timestamp_micros()
}
