//! Lead aggregate and the two orthogonal classification enums.
//!
//! Stage and status codes are SCREAMING_SNAKE_CASE on the wire. Parsing is
//! lenient (case-insensitive, `-` and space read as `_`) because the codes
//! arrive from forms and older records as well as from the backend.

pub mod lead;
pub mod stage;
pub mod status;

pub use lead::Lead;
pub use stage::PipelineStage;
pub use status::StatusFilter;

use std::fmt;

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

/// Canonical form of a stage/status code: trimmed, upper-cased, with `-`
/// and spaces folded to `_`.
#[must_use]
pub fn normalize_code(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}
