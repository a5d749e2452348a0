use chrono::{DateTime, Utc};

use super::author::resolve_author;
use super::context::ReconcileContext;
use super::transition::{interaction_transition, lifecycle_transition};
use super::{REMARK_UPDATED, TimelineEntry, TimelineSource};
use crate::event::{InteractionEvent, LifecycleEvent, RemarkEntry, parse_timestamp};

/// One input record at the reconciliation boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SourceRecord<'a> {
    /// An interaction, with the remark that supersedes its note, if any.
    Interaction {
        event: &'a InteractionEvent,
        remark: Option<&'a RemarkEntry>,
    },
    /// A remark with no linked interaction.
    Remark(&'a RemarkEntry),
    Lifecycle(&'a LifecycleEvent),
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn owned(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

impl<'a> SourceRecord<'a> {
    pub(crate) const fn source(&self) -> TimelineSource {
        match self {
            Self::Interaction { .. } => TimelineSource::Interaction,
            Self::Remark(_) => TimelineSource::Remark,
            Self::Lifecycle(_) => TimelineSource::Lifecycle,
        }
    }

    pub(crate) fn kind(&self) -> &'a str {
        match *self {
            Self::Interaction { event, .. } => event.kind.as_str(),
            Self::Remark(_) => REMARK_UPDATED,
            Self::Lifecycle(event) => event.kind.as_str(),
        }
    }

    fn id(&self) -> Option<&'a str> {
        match *self {
            Self::Interaction { event, .. } => non_blank(event.id.as_deref()),
            Self::Remark(remark) => non_blank(remark.id.as_deref()),
            Self::Lifecycle(event) => non_blank(event.id.as_deref()),
        }
    }

    /// The raw timestamp the entry is ordered by.
    pub(crate) fn occurred_at_raw(&self) -> Option<&'a str> {
        match *self {
            Self::Interaction { event, .. } => event.occurred_at.as_deref(),
            Self::Remark(remark) => remark.last_touched_raw(),
            Self::Lifecycle(event) => event.occurred_at.as_deref(),
        }
    }

    /// `id`, or `<type>-<occurredAt>` when the record has no id.
    pub(crate) fn dedup_key(&self) -> String {
        self.id().map_or_else(
            || format!("{}-{}", self.kind(), self.occurred_at_raw().unwrap_or_default()),
            str::to_string,
        )
    }

    pub(crate) fn project(
        self,
        id: String,
        occurred_at: DateTime<Utc>,
        ctx: &ReconcileContext<'_>,
    ) -> TimelineEntry {
        let mut entry = TimelineEntry {
            id,
            kind: self.kind().to_string(),
            source: self.source(),
            occurred_at,
            author: String::new(),
            text: None,
            transition: None,
            follow_up_at: None,
            channel: None,
            outcome: None,
            tags: Vec::new(),
        };

        match self {
            Self::Interaction { event, remark } => {
                let remark_author = remark.and_then(|r| r.author.as_deref());
                let remark_author_id = remark.and_then(|r| r.author_id.as_deref());
                entry.author = resolve_author(
                    [
                        remark_author,
                        event.author_name.as_deref(),
                        event.author_email.as_deref(),
                    ],
                    [remark_author_id, event.author_id.as_deref()],
                    ctx,
                );
                entry.text = owned(remark.and_then(|r| r.text.as_deref()))
                    .or_else(|| owned(event.text.as_deref()));
                entry.transition = interaction_transition(event);
                entry.follow_up_at = event.next_action_due_at.as_deref().and_then(parse_timestamp);
                entry.channel = owned(event.channel.as_deref());
                entry.outcome = owned(event.outcome.as_deref());
                entry.tags.clone_from(&event.tags);
            }
            Self::Remark(remark) => {
                entry.author = resolve_author(
                    [remark.author.as_deref()],
                    [remark.author_id.as_deref()],
                    ctx,
                );
                entry.text = owned(remark.text.as_deref());
            }
            Self::Lifecycle(event) => {
                entry.author = resolve_author(
                    [event.author_name.as_deref(), event.metadata_author()],
                    [event.author_id.as_deref()],
                    ctx,
                );
                entry.text = owned(event.text.as_deref());
                entry.transition = lifecycle_transition(event);
                entry.follow_up_at = event.metadata_follow_up().and_then(parse_timestamp);
            }
        }

        entry
    }
}
