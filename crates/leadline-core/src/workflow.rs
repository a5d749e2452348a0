//! Transition workflow: propose, commit, then run the auto-open follow-up.
//!
//! This is the caller side of the state machine. The primary change and
//! its event go through one [`LeadStore::commit`]. When the auto-open rule
//! fires, the status move to `OPEN` is a second commit; if it fails the
//! primary transition still stands and the failure is reported in the
//! outcome.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::event::InteractionEvent;
use crate::lifecycle::{
    AUTO_OPEN_STATUS, StateMachine, TransitionContext, evaluate_auto_open,
};
use crate::model::{Lead, PipelineStage, StatusFilter};
use crate::store::LeadStore;

/// What happened to the auto-open follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AutoOpen {
    /// The rule did not fire.
    NotTriggered,
    /// The lead was moved to `OPEN`.
    Applied,
    /// The rule fired but the status commit failed.
    Failed { reason: String },
}

/// Result of a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionOutcome {
    /// The lead after every commit that succeeded.
    pub lead: Lead,
    /// Stored events, primary first.
    pub events: Vec<InteractionEvent>,
    pub auto_open: AutoOpen,
}

/// Move a lead to `next` and, if the auto-open rule fires, open it.
///
/// # Errors
///
/// Returns the validation or store error of the primary transition. A
/// failing auto-open commit is not an error; see [`AutoOpen::Failed`].
pub fn submit_stage_change<S: LeadStore + ?Sized>(
    store: &mut S,
    machine: &StateMachine,
    next: PipelineStage,
    ctx: &TransitionContext,
) -> Result<TransitionOutcome, WorkflowError> {
    let lead = store.load(&ctx.lead_id)?;
    let accepted = machine.propose_stage_change(lead.pipeline_stage, next, ctx)?;
    let commit = store.commit(&ctx.lead_id, &accepted)?;

    info!(
        lead_id = %ctx.lead_id,
        from = %lead.pipeline_stage,
        to = %next,
        "stage changed"
    );

    let mut outcome = TransitionOutcome {
        lead: commit.lead,
        events: vec![commit.event],
        auto_open: AutoOpen::NotTriggered,
    };

    if !evaluate_auto_open(lead.status_filter.as_str(), next.as_str()) {
        return Ok(outcome);
    }

    // The follow-up carries no note or reason of its own.
    let follow_up_ctx = TransitionContext::new(ctx.lead_id.clone(), ctx.occurred_at)
        .with_actor(ctx.actor.clone());

    let result = machine
        .propose_status_change(outcome.lead.status_filter, AUTO_OPEN_STATUS, &follow_up_ctx)
        .map_err(WorkflowError::from)
        .and_then(|accepted| {
            store
                .commit(&ctx.lead_id, &accepted)
                .map_err(WorkflowError::from)
        });

    match result {
        Ok(commit) => {
            info!(lead_id = %ctx.lead_id, "lead opened automatically after first talk");
            outcome.lead = commit.lead;
            outcome.events.push(commit.event);
            outcome.auto_open = AutoOpen::Applied;
        }
        Err(err) => {
            warn!(lead_id = %ctx.lead_id, error = %err, "auto-open follow-up failed");
            outcome.auto_open = AutoOpen::Failed {
                reason: err.to_string(),
            };
        }
    }

    Ok(outcome)
}

/// Move a lead's status filter to `next`.
///
/// # Errors
///
/// Returns the validation or store error of the transition.
pub fn submit_status_change<S: LeadStore + ?Sized>(
    store: &mut S,
    machine: &StateMachine,
    next: StatusFilter,
    ctx: &TransitionContext,
) -> Result<TransitionOutcome, WorkflowError> {
    let lead = store.load(&ctx.lead_id)?;
    let accepted = machine.propose_status_change(lead.status_filter, next, ctx)?;
    let commit = store.commit(&ctx.lead_id, &accepted)?;

    info!(
        lead_id = %ctx.lead_id,
        from = %lead.status_filter,
        to = %next,
        "status changed"
    );

    Ok(TransitionOutcome {
        lead: commit.lead,
        events: vec![commit.event],
        auto_open: AutoOpen::NotTriggered,
    })
}
