//! `leadline status`: move a lead to a new status filter.

use clap::Args;
use leadline_core::config::EffectiveConfig;
use leadline_core::lifecycle::{StateMachine, TransitionContext};
use leadline_core::model::{Lead, PipelineStage, StatusFilter};
use leadline_core::store::MemoryLeadStore;
use leadline_core::timeline::Viewer;
use leadline_core::workflow::submit_status_change;

use super::outcome::render_outcome;
use super::{occurred_at, parse_instant};
use crate::output::{CliError, OutputMode, render_error};
use crate::viewer::actor_for;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Lead id.
    #[arg(long, default_value = "lead-1")]
    pub lead_id: String,

    /// Current pipeline stage.
    #[arg(long, default_value = "NEW_LEAD")]
    pub stage: PipelineStage,

    /// Current status filter.
    #[arg(long, default_value = "PENDING")]
    pub from: StatusFilter,

    /// Proposed status filter.
    #[arg(long)]
    pub to: StatusFilter,

    /// Free-text note recorded on the event.
    #[arg(long)]
    pub note: Option<String>,

    /// Contact channel (e.g. PHONE, EMAIL).
    #[arg(long)]
    pub channel: Option<String>,

    /// Next follow-up date.
    #[arg(long)]
    pub follow_up: Option<String>,

    /// When the change happened (defaults to now).
    #[arg(long)]
    pub at: Option<String>,
}

pub fn run_status(
    args: &StatusArgs,
    viewer: Option<&Viewer>,
    config: &EffectiveConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let at = occurred_at(args.at.as_deref(), output)?;

    let mut ctx = TransitionContext::new(args.lead_id.clone(), at).with_actor(actor_for(viewer));
    if let Some(raw) = args.follow_up.as_deref() {
        ctx = ctx.with_follow_up(parse_instant(raw, "follow-up", output)?);
    }
    ctx.note.clone_from(&args.note);
    ctx.channel.clone_from(&args.channel);

    let mut lead = Lead::new(args.lead_id.clone(), at);
    lead.pipeline_stage = args.stage;
    lead.status_filter = args.from;

    let mut store = MemoryLeadStore::new();
    store.insert(lead);

    let machine = StateMachine::new(config.project.lifecycle.policy());
    match submit_status_change(&mut store, &machine, args.to, &ctx) {
        Ok(outcome) => render_outcome(output, &outcome),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            anyhow::bail!("{err}");
        }
    }
}
