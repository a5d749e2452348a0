//! `leadline auto-open`: evaluate the auto-open rule.

use clap::Args;
use leadline_core::lifecycle::{AUTO_OPEN_STATUS, evaluate_auto_open};
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{OutputMode, pretty_kv, render_mode};

#[derive(Args, Debug)]
pub struct AutoOpenArgs {
    /// Status the lead had before the stage change.
    #[arg(value_name = "PREVIOUS_STATUS")]
    pub previous_status: String,

    /// Proposed pipeline stage.
    #[arg(value_name = "STAGE")]
    pub stage: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoOpenOutput<'a> {
    previous_status: &'a str,
    stage: &'a str,
    auto_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_status: Option<&'static str>,
}

fn render_text(out: &AutoOpenOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", out.auto_open)
}

fn render_pretty(out: &AutoOpenOutput<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_kv(w, "Auto-open", if out.auto_open { "yes" } else { "no" })?;
    if let Some(target) = out.target_status {
        pretty_kv(w, "New status", target)?;
    }
    Ok(())
}

pub fn run_auto_open(args: &AutoOpenArgs, output: OutputMode) -> anyhow::Result<()> {
    let auto_open = evaluate_auto_open(&args.previous_status, &args.stage);
    let out = AutoOpenOutput {
        previous_status: &args.previous_status,
        stage: &args.stage,
        auto_open,
        target_status: auto_open.then_some(AUTO_OPEN_STATUS.as_str()),
    };
    render_mode(output, &out, render_text, render_pretty)
}
