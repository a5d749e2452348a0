use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PipelineStage, StatusFilter};
use crate::lifecycle::LeadChange;

/// The lead aggregate as supplied by the lead store.
///
/// The core never persists this; it only reads it to build proposals and
/// (in [`Lead::apply`]) shows what the store is expected to write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub pipeline_stage: PipelineStage,
    pub status_filter: StatusFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dormant_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action_due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// A fresh lead in `NEW_LEAD` / `PENDING`.
    #[must_use]
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            pipeline_stage: PipelineStage::NewLead,
            status_filter: StatusFilter::Pending,
            dormant_reason: None,
            next_action_due_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply an accepted change, returning the updated aggregate.
    ///
    /// Leaving a dormant stage clears the stored reason; entering one
    /// records it. A follow-up date on the change replaces the lead's.
    #[must_use]
    pub fn apply(&self, change: &LeadChange, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        match change {
            LeadChange::Stage {
                to, dormant_reason, ..
            } => {
                next.pipeline_stage = *to;
                next.dormant_reason = if to.is_dormant() {
                    dormant_reason.clone()
                } else {
                    None
                };
            }
            LeadChange::Status { to, .. } => {
                next.status_filter = *to;
            }
        }
        if let Some(due) = change.next_follow_up_at() {
            next.next_action_due_at = Some(due);
        }
        next.updated_at = at;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    #[test]
    fn new_lead_defaults() {
        let lead = Lead::new("lead-1", ts(100));
        assert_eq!(lead.pipeline_stage, PipelineStage::NewLead);
        assert_eq!(lead.status_filter, StatusFilter::Pending);
        assert!(lead.dormant_reason.is_none());
        assert_eq!(lead.updated_at, ts(100));
    }

    #[test]
    fn apply_stage_change_into_and_out_of_dormant() {
        let lead = Lead::new("lead-1", ts(100));
        let dormant = lead.apply(
            &LeadChange::Stage {
                from: PipelineStage::NewLead,
                to: PipelineStage::Hibernated,
                dormant_reason: Some("moved abroad".into()),
                next_follow_up_at: None,
            },
            ts(200),
        );
        assert_eq!(dormant.pipeline_stage, PipelineStage::Hibernated);
        assert_eq!(dormant.dormant_reason.as_deref(), Some("moved abroad"));
        assert_eq!(dormant.updated_at, ts(200));

        let revived = dormant.apply(
            &LeadChange::Stage {
                from: PipelineStage::Hibernated,
                to: PipelineStage::FollowingUp,
                dormant_reason: None,
                next_follow_up_at: Some(ts(900)),
            },
            ts(300),
        );
        assert!(revived.dormant_reason.is_none());
        assert_eq!(revived.next_action_due_at, Some(ts(900)));
    }

    #[test]
    fn lead_json_is_camel_case() {
        let lead = Lead::new("lead-9", ts(0));
        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["pipelineStage"], "NEW_LEAD");
        assert_eq!(json["statusFilter"], "PENDING");
        assert!(json.get("dormantReason").is_none());
    }
}
