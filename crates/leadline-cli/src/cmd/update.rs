//! `leadline update`: validate a combined status/stage save.
//!
//! Values arrive as raw form codes, so unknown codes are reported with the
//! same structured error as a failed guard.

use clap::Args;
use leadline_core::error::ErrorCode;
use leadline_core::lifecycle::{CombinedUpdate, validate_combined_update};
use serde::Serialize;
use std::io::{self, Write};
use std::str::FromStr;

use crate::output::{CliError, OutputMode, pretty_kv, pretty_section, render_error, render_mode};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// New status filter.
    #[arg(long)]
    pub status: Option<String>,

    /// New pipeline stage.
    #[arg(long)]
    pub stage: Option<String>,

    /// Dormant reason.
    #[arg(long)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct UpdateOutput {
    ok: bool,
    update: CombinedUpdate,
}

fn parse_code<T>(raw: Option<&str>, output: OutputMode) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<T>() {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            let cli = CliError::coded(err.to_string(), ErrorCode::InvalidEnumValue);
            render_error(output, &cli)?;
            anyhow::bail!("{err}");
        }
    }
}

fn render_text(out: &UpdateOutput, w: &mut dyn Write) -> io::Result<()> {
    let update = &out.update;
    writeln!(
        w,
        "ok  status={}  stage={}  reason={}",
        update.new_status.map_or("-", |s| s.as_str()),
        update.new_stage.map_or("-", |s| s.as_str()),
        update.dormant_reason.as_deref().unwrap_or("-")
    )
}

fn render_pretty(out: &UpdateOutput, w: &mut dyn Write) -> io::Result<()> {
    let update = &out.update;
    pretty_section(w, "Update accepted")?;
    if let Some(status) = update.new_status {
        pretty_kv(w, "Status", status.label())?;
    }
    if let Some(stage) = update.new_stage {
        pretty_kv(w, "Stage", stage.label())?;
    }
    if let Some(reason) = &update.dormant_reason {
        pretty_kv(w, "Reason", reason)?;
    }
    Ok(())
}

pub fn run_update(args: &UpdateArgs, output: OutputMode) -> anyhow::Result<()> {
    let update = CombinedUpdate {
        new_status: parse_code(args.status.as_deref(), output)?,
        new_stage: parse_code(args.stage.as_deref(), output)?,
        dormant_reason: args.reason.clone(),
    };

    match validate_combined_update(&update) {
        Ok(update) => render_mode(
            output,
            &UpdateOutput { ok: true, update },
            render_text,
            render_pretty,
        ),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    }
}
