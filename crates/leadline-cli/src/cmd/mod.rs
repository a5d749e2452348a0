pub mod auto_open;
pub mod input;
pub mod outcome;
pub mod stage;
pub mod stages;
pub mod status;
pub mod timeline;
pub mod update;

use chrono::{DateTime, Utc};
use leadline_core::error::ErrorCode;
use leadline_core::event::parse_timestamp;

use crate::output::{CliError, OutputMode, render_error};

/// Parse a timestamp flag, rendering a coded error on failure.
pub fn parse_instant(
    raw: &str,
    flag: &str,
    output: OutputMode,
) -> anyhow::Result<DateTime<Utc>> {
    if let Some(at) = parse_timestamp(raw) {
        return Ok(at);
    }
    let err = CliError::coded(
        format!("--{flag}: '{raw}' is not a timestamp"),
        ErrorCode::InputParseError,
    );
    render_error(output, &err)?;
    anyhow::bail!("{}", err.message)
}

/// `--at` when given, otherwise now.
pub fn occurred_at(raw: Option<&str>, output: OutputMode) -> anyhow::Result<DateTime<Utc>> {
    raw.map_or_else(|| Ok(Utc::now()), |raw| parse_instant(raw, "at", output))
}
