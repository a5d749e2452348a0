use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::event::{InteractionEvent, InteractionType};
use crate::model::{PipelineStage, StatusFilter};

/// Who is making the change. Every field is optional because the identity
/// service may only know part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Everything a proposal needs besides the from/to values.
///
/// `occurred_at` is supplied by the caller; the machine never reads a clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionContext {
    pub lead_id: String,
    pub occurred_at: DateTime<Utc>,
    pub actor: Actor,
    pub note: Option<String>,
    pub channel: Option<String>,
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub dormant_reason: Option<String>,
}

impl TransitionContext {
    #[must_use]
    pub fn new(lead_id: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            lead_id: lead_id.into(),
            occurred_at,
            actor: Actor::default(),
            note: None,
            channel: None,
            next_follow_up_at: None,
            dormant_reason: None,
        }
    }

    #[must_use]
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[must_use]
    pub const fn with_follow_up(mut self, at: DateTime<Utc>) -> Self {
        self.next_follow_up_at = Some(at);
        self
    }

    #[must_use]
    pub fn with_dormant_reason(mut self, reason: impl Into<String>) -> Self {
        self.dormant_reason = Some(reason.into());
        self
    }
}

/// The state change a proposal was accepted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "field", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum LeadChange {
    Stage {
        from: PipelineStage,
        to: PipelineStage,
        #[serde(skip_serializing_if = "Option::is_none")]
        dormant_reason: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_follow_up_at: Option<DateTime<Utc>>,
    },
    Status {
        from: StatusFilter,
        to: StatusFilter,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_follow_up_at: Option<DateTime<Utc>>,
    },
}

impl LeadChange {
    #[must_use]
    pub const fn next_follow_up_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Stage {
                next_follow_up_at, ..
            }
            | Self::Status {
                next_follow_up_at, ..
            } => *next_follow_up_at,
        }
    }
}

/// An accepted proposal: the change and the event that records it.
///
/// The pair is only built by [`StateMachine`], so an accepted decision
/// always carries its event. The store must write both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    change: LeadChange,
    event: InteractionEvent,
    #[serde(skip)]
    occurred_at: DateTime<Utc>,
}

impl Accepted {
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    #[must_use]
    pub const fn change(&self) -> &LeadChange {
        &self.change
    }

    #[must_use]
    pub const fn event(&self) -> &InteractionEvent {
        &self.event
    }

    #[must_use]
    pub fn into_parts(self) -> (LeadChange, InteractionEvent) {
        (self.change, self.event)
    }
}

/// Guard settings for stage proposals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePolicy {
    /// Reject moves from a progressed stage back to `NEW_LEAD` or
    /// `FIRST_TALK_DONE`. Off by default.
    #[serde(default)]
    pub reject_regression: bool,
}

/// The lead state machine. Holds only its policy; every call is a pure
/// function of its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateMachine {
    policy: StagePolicy,
}

impl StateMachine {
    #[must_use]
    pub const fn new(policy: StagePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> StagePolicy {
        self.policy
    }

    /// Validate a pipeline-stage move and build its `STAGE_CHANGE` event.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingDormantReason`] when `next` is dormant and
    ///   the context has no non-blank reason.
    /// - [`ValidationError::StageRegression`] when the policy forbids moving
    ///   back into an early stage.
    pub fn propose_stage_change(
        &self,
        current: PipelineStage,
        next: PipelineStage,
        ctx: &TransitionContext,
    ) -> Result<Accepted, ValidationError> {
        let reason = non_blank(ctx.dormant_reason.as_deref());
        if next.is_dormant() && reason.is_none() {
            return Err(ValidationError::MissingDormantReason { stage: next });
        }

        if self.policy.reject_regression && !current.is_early() && next.is_early() {
            return Err(ValidationError::StageRegression {
                from: current,
                to: next,
            });
        }

        let dormant_reason = if next.is_dormant() { reason } else { None };
        let mut event = base_event(InteractionType::StageChange, ctx);
        event.stage_from = Some(current.as_str().to_string());
        event.stage_to = Some(next.as_str().to_string());
        event.dormant_reason.clone_from(&dormant_reason);

        tracing::debug!(
            lead_id = %ctx.lead_id,
            from = %current,
            to = %next,
            "stage change accepted"
        );

        Ok(Accepted {
            change: LeadChange::Stage {
                from: current,
                to: next,
                dormant_reason,
                next_follow_up_at: ctx.next_follow_up_at,
            },
            event,
            occurred_at: ctx.occurred_at,
        })
    }

    /// Validate a status-filter move and build its `STATUS_CHANGE` event.
    ///
    /// Status moves have no guard.
    ///
    /// # Errors
    ///
    /// Currently never fails.
    pub fn propose_status_change(
        &self,
        current: StatusFilter,
        next: StatusFilter,
        ctx: &TransitionContext,
    ) -> Result<Accepted, ValidationError> {
        let mut event = base_event(InteractionType::StatusChange, ctx);
        event.status_from = Some(current.as_str().to_string());
        event.status_to = Some(next.as_str().to_string());

        tracing::debug!(
            lead_id = %ctx.lead_id,
            from = %current,
            to = %next,
            "status change accepted"
        );

        Ok(Accepted {
            change: LeadChange::Status {
                from: current,
                to: next,
                next_follow_up_at: ctx.next_follow_up_at,
            },
            event,
            occurred_at: ctx.occurred_at,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn base_event(kind: InteractionType, ctx: &TransitionContext) -> InteractionEvent {
    InteractionEvent {
        id: None,
        lead_id: ctx.lead_id.clone(),
        kind,
        occurred_at: Some(ctx.occurred_at.to_rfc3339()),
        author_id: ctx.actor.id.clone(),
        author_name: ctx.actor.name.clone(),
        author_email: ctx.actor.email.clone(),
        next_action_due_at: ctx.next_follow_up_at.map(|at| at.to_rfc3339()),
        channel: non_blank(ctx.channel.as_deref()),
        text: non_blank(ctx.note.as_deref()),
        ..InteractionEvent::default()
    }
}
