//! Timeline reconciliation.
//!
//! Interactions, remarks, and lifecycle-log events arrive from separate
//! services that page and lag independently. [`reconcile`] merges them into
//! one feed with a fixed precedence:
//!
//! 1. interactions, each absorbing the remark linked to it,
//! 2. remarks with no linked interaction, as `REMARK_UPDATED` entries,
//! 3. lifecycle events.
//!
//! Entries are deduplicated by id (or `type-occurredAt` when there is none)
//! with the first occurrence winning, entries without a readable timestamp
//! are dropped, and the rest are stable-sorted newest first. Dedup runs
//! before the timestamp filter, so a dropped entry still claims its key.
//!
//! Reconciliation is a pure function: the same inputs always yield the same
//! feed, and the inputs are never modified.

mod author;
mod context;
mod source;
pub mod transition;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::event::{InteractionEvent, LifecycleEvent, RemarkEntry, parse_timestamp};
pub use context::{ReconcileContext, UNKNOWN_AUTHOR, Viewer};
use source::SourceRecord;
pub use transition::{stage_transition, status_transition};

/// Entry type for a standalone remark.
pub const REMARK_UPDATED: &str = "REMARK_UPDATED";

/// Which input collection an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineSource {
    Interaction,
    Remark,
    Lifecycle,
}

impl TimelineSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interaction => "interaction",
            Self::Remark => "remark",
            Self::Lifecycle => "lifecycle",
        }
    }
}

/// One reconciled row of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Source id, or `type-occurredAt` for records without one.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub source: TimelineSource,
    pub occurred_at: DateTime<Utc>,
    /// Resolved display name; never empty.
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `Stage: A → B` or `Status: A → B`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Index linked remarks by interaction id.
///
/// When several remarks link to one interaction, the most recently touched
/// wins. A tie, or a timestamp that does not parse on either side, goes to
/// the later remark in input order.
fn index_linked_remarks(remarks: &[RemarkEntry]) -> HashMap<&str, &RemarkEntry> {
    let mut index: HashMap<&str, &RemarkEntry> = HashMap::new();

    for remark in remarks {
        let Some(interaction_id) = remark.linked_interaction() else {
            continue;
        };
        let Some(&existing) = index.get(interaction_id) else {
            index.insert(interaction_id, remark);
            continue;
        };

        let touched = |r: &RemarkEntry| r.last_touched_raw().and_then(parse_timestamp);
        let replace = match (touched(existing), touched(remark)) {
            (Some(kept), Some(candidate)) => candidate >= kept,
            _ => true,
        };

        debug!(
            interaction_id,
            kept = ?existing.id,
            candidate = ?remark.id,
            replace,
            "several remarks link to one interaction"
        );
        if replace {
            index.insert(interaction_id, remark);
        }
    }

    index
}

/// Merge the three collections into one deduplicated, newest-first feed.
///
/// An entry dropped for an unreadable timestamp still claims its dedup key,
/// so a later duplicate with a good timestamp is not shown in its place.
#[must_use]
pub fn reconcile(
    interactions: &[InteractionEvent],
    remarks: &[RemarkEntry],
    lifecycle: &[LifecycleEvent],
    ctx: &ReconcileContext<'_>,
) -> Vec<TimelineEntry> {
    let linked = index_linked_remarks(remarks);

    let orphaned = linked
        .keys()
        .filter(|id| {
            !interactions
                .iter()
                .any(|event| event.id.as_deref().map(str::trim) == Some(**id))
        })
        .count();

    let records = interactions
        .iter()
        .map(|event| SourceRecord::Interaction {
            event,
            remark: event
                .id
                .as_deref()
                .map(str::trim)
                .and_then(|id| linked.get(id).copied()),
        })
        .chain(
            remarks
                .iter()
                .filter(|remark| remark.linked_interaction().is_none())
                .map(SourceRecord::Remark),
        )
        .chain(lifecycle.iter().map(SourceRecord::Lifecycle));

    let mut seen = HashSet::new();
    let mut duplicates = 0_usize;
    let mut unparseable = 0_usize;
    let mut entries = Vec::new();

    for record in records {
        let key = record.dedup_key();
        if !seen.insert(key.clone()) {
            duplicates += 1;
            continue;
        }
        let Some(occurred_at) = record.occurred_at_raw().and_then(parse_timestamp) else {
            unparseable += 1;
            continue;
        };
        entries.push(record.project(key, occurred_at, ctx));
    }

    // `sort_by` is stable, so equal instants keep source precedence.
    entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

    debug!(
        interactions = interactions.len(),
        remarks = remarks.len(),
        lifecycle = lifecycle.len(),
        entries = entries.len(),
        duplicates,
        unparseable,
        orphaned_remarks = orphaned,
        "timeline reconciled"
    );

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InteractionType;
    use serde_json::json;

    fn remark(id: &str, link: &str, text: &str, updated: Option<&str>) -> RemarkEntry {
        RemarkEntry {
            id: Some(id.into()),
            text: Some(text.into()),
            created_at: Some("2024-01-01T00:00:00Z".into()),
            updated_at: updated.map(str::to_string),
            associated_interaction_id: Some(link.into()),
            ..RemarkEntry::default()
        }
    }

    #[test]
    fn latest_linked_remark_wins() {
        let remarks = [
            remark("r1", "i1", "newer", Some("2024-02-01T00:00:00Z")),
            remark("r2", "i1", "older", Some("2024-01-15T00:00:00Z")),
        ];
        let index = index_linked_remarks(&remarks);
        assert_eq!(index["i1"].id.as_deref(), Some("r1"));
    }

    #[test]
    fn tied_or_unparseable_links_go_to_later_remark() {
        let tied = [
            remark("r1", "i1", "a", Some("2024-02-01T00:00:00Z")),
            remark("r2", "i1", "b", Some("2024-02-01T00:00:00Z")),
        ];
        assert_eq!(index_linked_remarks(&tied)["i1"].id.as_deref(), Some("r2"));

        let mut garbled = remark("r1", "i1", "a", Some("soon"));
        garbled.created_at = None;
        let unreadable = [garbled, remark("r2", "i1", "b", None)];
        assert_eq!(
            index_linked_remarks(&unreadable)["i1"].id.as_deref(),
            Some("r2")
        );
    }

    #[test]
    fn linked_remark_is_never_standalone() {
        let remarks = [remark("r1", "missing-interaction", "hello", None)];
        let feed = reconcile(&[], &remarks, &[], &ReconcileContext::default());
        assert!(feed.is_empty());
    }

    #[test]
    fn equal_instants_keep_source_precedence() {
        let at = "2024-03-01T10:00:00Z";
        let interactions = [InteractionEvent {
            id: Some("i".into()),
            kind: InteractionType::Call,
            occurred_at: Some(at.into()),
            ..InteractionEvent::default()
        }];
        let remarks = [RemarkEntry {
            id: Some("r".into()),
            created_at: Some(at.into()),
            ..RemarkEntry::default()
        }];
        let lifecycle = [LifecycleEvent {
            id: Some("l".into()),
            kind: "LEAD_CREATED".into(),
            occurred_at: Some(at.into()),
            ..LifecycleEvent::default()
        }];

        let feed = reconcile(&interactions, &remarks, &lifecycle, &ReconcileContext::default());
        let ids: Vec<_> = feed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["i", "r", "l"]);
    }

    #[test]
    fn lifecycle_author_falls_back_to_viewer_then_sentinel() {
        let viewer = Viewer::new("u-1", "Asha");
        let ctx = ReconcileContext::new(Some(&viewer));
        let events = [
            LifecycleEvent {
                id: Some("a".into()),
                kind: "NOTE".into(),
                occurred_at: Some("2024-03-01T10:00:00Z".into()),
                author_id: Some("u-1".into()),
                ..LifecycleEvent::default()
            },
            LifecycleEvent {
                id: Some("b".into()),
                kind: "NOTE".into(),
                occurred_at: Some("2024-03-01T09:00:00Z".into()),
                author_id: Some("u-2".into()),
                metadata: json!({"actor": {"displayName": "Ravi"}})
                    .as_object()
                    .cloned()
                    .unwrap(),
                ..LifecycleEvent::default()
            },
            LifecycleEvent {
                id: Some("c".into()),
                kind: "NOTE".into(),
                occurred_at: Some("2024-03-01T08:00:00Z".into()),
                author_id: Some("u-3".into()),
                ..LifecycleEvent::default()
            },
        ];

        let feed = reconcile(&[], &[], &events, &ctx);
        let authors: Vec<_> = feed.iter().map(|e| e.author.as_str()).collect();
        assert_eq!(authors, ["Asha", "Ravi", UNKNOWN_AUTHOR]);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let events = [LifecycleEvent {
            id: Some("l1".into()),
            kind: "STAGE_CHANGED".into(),
            occurred_at: Some("2024-03-01T10:00:00Z".into()),
            prev: Some(json!("NEW_LEAD")),
            next: Some(json!("FIRST_TALK_DONE")),
            metadata: json!({"nextActionDueAt": "2024-03-05"})
                .as_object()
                .cloned()
                .unwrap(),
            ..LifecycleEvent::default()
        }];
        let feed = reconcile(&[], &[], &events, &ReconcileContext::default());
        let value = serde_json::to_value(&feed[0]).unwrap();
        assert_eq!(value["type"], "STAGE_CHANGED");
        assert_eq!(value["source"], "lifecycle");
        assert_eq!(value["transition"], "Stage: New Lead → First Talk Done");
        assert_eq!(value["followUpAt"], "2024-03-05T00:00:00Z");
        assert!(value.get("tags").is_none());
    }
}
