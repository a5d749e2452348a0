//! Rendering shared by `leadline stage` and `leadline status`.

use leadline_core::event::InteractionEvent;
use leadline_core::format::{format_timestamp, type_label};
use leadline_core::workflow::{AutoOpen, TransitionOutcome};
use std::io::{self, Write};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

fn auto_open_text(auto_open: &AutoOpen) -> String {
    match auto_open {
        AutoOpen::NotTriggered => "not-triggered".to_string(),
        AutoOpen::Applied => "applied".to_string(),
        AutoOpen::Failed { reason } => format!("failed ({reason})"),
    }
}

fn event_change(event: &InteractionEvent) -> String {
    let pair = |from: Option<&str>, to: Option<&str>| {
        format!("{}→{}", from.unwrap_or("?"), to.unwrap_or("?"))
    };
    if event.stage_to.is_some() {
        pair(event.stage_from.as_deref(), event.stage_to.as_deref())
    } else {
        pair(event.status_from.as_deref(), event.status_to.as_deref())
    }
}

fn render_text(outcome: &TransitionOutcome, w: &mut dyn Write) -> io::Result<()> {
    let lead = &outcome.lead;
    writeln!(
        w,
        "{}  {}  {}  auto-open={}",
        lead.id,
        lead.pipeline_stage,
        lead.status_filter,
        auto_open_text(&outcome.auto_open)
    )?;
    for event in &outcome.events {
        writeln!(
            w,
            "event  {}  {}  {}",
            event.id.as_deref().unwrap_or("-"),
            event.kind,
            event_change(event)
        )?;
    }
    Ok(())
}

fn render_pretty(outcome: &TransitionOutcome, w: &mut dyn Write) -> io::Result<()> {
    let lead = &outcome.lead;
    pretty_section(w, &format!("Lead {}", lead.id))?;
    pretty_kv(w, "Stage", lead.pipeline_stage.label())?;
    pretty_kv(w, "Status", lead.status_filter.label())?;
    if let Some(reason) = &lead.dormant_reason {
        pretty_kv(w, "Dormant", reason)?;
    }
    if let Some(due) = lead.next_action_due_at {
        pretty_kv(w, "Follow-up", format_timestamp(due))?;
    }
    pretty_kv(w, "Auto-open", auto_open_text(&outcome.auto_open))?;
    writeln!(w)?;

    pretty_section(w, "Events")?;
    for event in &outcome.events {
        writeln!(
            w,
            "{:<14} {:<16} {}",
            event.id.as_deref().unwrap_or("-"),
            type_label(event.kind.as_str()),
            event_change(event)
        )?;
        if let Some(text) = &event.text {
            writeln!(w, "{:<14} {text}", "")?;
        }
    }
    Ok(())
}

/// Print a committed transition in the requested mode.
pub fn render_outcome(output: OutputMode, outcome: &TransitionOutcome) -> anyhow::Result<()> {
    render_mode(output, outcome, render_text, render_pretty)
}
