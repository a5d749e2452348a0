//! `leadline timeline`: print the reconciled activity feed.

use clap::Args;
use leadline_core::config::EffectiveConfig;
use leadline_core::error::ErrorCode;
use leadline_core::event::{InteractionEvent, LifecycleEvent, RemarkEntry};
use leadline_core::format::{format_timestamp, truncate, type_label};
use leadline_core::timeline::{ReconcileContext, TimelineEntry, Viewer, reconcile};
use std::io::{self, Write};
use std::path::PathBuf;

use super::input::load_json_array;
use crate::output::{CliError, OutputMode, Renderable, render_error, render_list, write_json};

const TEXT_WIDTH: usize = 60;
const PRETTY_TEXT_WIDTH: usize = 200;

#[derive(Args, Debug)]
pub struct TimelineArgs {
    /// JSON array of interaction events.
    #[arg(long, value_name = "FILE")]
    pub interactions: Option<PathBuf>,

    /// JSON array of remarks.
    #[arg(long, value_name = "FILE")]
    pub remarks: Option<PathBuf>,

    /// JSON array of lifecycle-log events.
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,

    /// Show at most this many entries (newest first).
    #[arg(long)]
    pub limit: Option<usize>,
}

impl Renderable for TimelineEntry {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {} · {}",
            format_timestamp(self.occurred_at),
            type_label(&self.kind),
            self.author
        )?;
        if let Some(transition) = &self.transition {
            writeln!(w, "    {transition}")?;
        }
        if let Some(text) = &self.text {
            writeln!(w, "    {}", truncate(text, PRETTY_TEXT_WIDTH))?;
        }
        if let Some(due) = self.follow_up_at {
            writeln!(w, "    follow-up: {}", format_timestamp(due))?;
        }
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        write_json(w, self)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let text = self
            .text
            .as_deref()
            .map(|t| truncate(&t.replace('\n', " "), TEXT_WIDTH))
            .unwrap_or_default();
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}",
            self.occurred_at.to_rfc3339(),
            self.source.as_str(),
            self.kind,
            self.author,
            self.transition.as_deref().unwrap_or("-"),
            text
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["time", "source", "type", "author", "detail", "text"]
    }
}

fn load<T: serde::de::DeserializeOwned>(
    path: Option<&PathBuf>,
    output: OutputMode,
) -> anyhow::Result<Vec<T>> {
    match load_json_array(path.map(PathBuf::as_path)) {
        Ok(records) => Ok(records),
        Err(err) => {
            render_error(
                output,
                &CliError::coded(format!("{err:#}"), ErrorCode::InputParseError),
            )?;
            Err(err)
        }
    }
}

pub fn run_timeline(
    args: &TimelineArgs,
    viewer: Option<&Viewer>,
    config: &EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let interactions: Vec<InteractionEvent> = load(args.interactions.as_ref(), output)?;
    let remarks: Vec<RemarkEntry> = load(args.remarks.as_ref(), output)?;
    let lifecycle: Vec<LifecycleEvent> = load(args.events.as_ref(), output)?;

    let ctx = ReconcileContext::new(viewer).with_unknown_author(&config.project.timeline.unknown_author);
    let mut entries = reconcile(&interactions, &remarks, &lifecycle, &ctx);

    if let Some(limit) = args.limit.or(config.project.timeline.limit) {
        entries.truncate(limit);
    }

    render_list(&entries, output)?;
    Ok(())
}
