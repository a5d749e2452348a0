//! `leadline stages`: list the stages a form should offer next.

use clap::Args;
use leadline_core::lifecycle::{selectable_next_stages, selectable_statuses};
use leadline_core::model::{PipelineStage, StatusFilter};
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{OutputMode, Renderable, render_list, write_json};

#[derive(Args, Debug)]
pub struct StagesArgs {
    /// The lead's current pipeline stage.
    #[arg(long, default_value = "NEW_LEAD")]
    pub current: PipelineStage,

    /// List selectable status filters instead of stages.
    #[arg(long)]
    pub statuses: bool,
}

/// One selectable value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionRow {
    code: &'static str,
    label: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    requires_reason: bool,
}

impl From<PipelineStage> for OptionRow {
    fn from(stage: PipelineStage) -> Self {
        Self {
            code: stage.as_str(),
            label: stage.label(),
            requires_reason: stage.is_dormant(),
        }
    }
}

impl From<StatusFilter> for OptionRow {
    fn from(status: StatusFilter) -> Self {
        Self {
            code: status.as_str(),
            label: status.label(),
            requires_reason: false,
        }
    }
}

impl Renderable for OptionRow {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let marker = if self.requires_reason {
            "  (reason required)"
        } else {
            ""
        };
        writeln!(w, "{:<24} {}{marker}", self.label, self.code)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}  {}", self.code, self.label)
    }

    fn table_headers() -> &'static [&'static str] {
        &["code", "label"]
    }
}

pub fn run_stages(args: &StagesArgs, output: OutputMode) -> anyhow::Result<()> {
    let rows: Vec<OptionRow> = if args.statuses {
        selectable_statuses().iter().copied().map(OptionRow::from).collect()
    } else {
        selectable_next_stages(args.current)
            .into_iter()
            .map(OptionRow::from)
            .collect()
    };
    render_list(&rows, output)?;
    Ok(())
}
