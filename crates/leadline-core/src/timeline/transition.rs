//! Transition detail strings such as `Stage: New Lead → First Talk Done`.
//!
//! A detail is built only when both sides resolve to a known label. If
//! either half is unknown, the detail is omitted.

use serde_json::Value;

use crate::event::{InteractionEvent, InteractionType, LifecycleEvent};
use crate::model::{PipelineStage, StatusFilter, normalize_code};

const STAGE_KEYS: [&str; 3] = ["pipelineStage", "pipeline_stage", "stage"];
const STATUS_KEYS: [&str; 3] = ["statusFilter", "status_filter", "status"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Stage,
    Status,
}

impl Field {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Stage => "Stage",
            Self::Status => "Status",
        }
    }

    const fn snapshot_keys(self) -> &'static [&'static str] {
        match self {
            Self::Stage => &STAGE_KEYS,
            Self::Status => &STATUS_KEYS,
        }
    }

    fn label(self, code: &str) -> Option<&'static str> {
        match self {
            Self::Stage => PipelineStage::label_for(code),
            Self::Status => StatusFilter::label_for(code),
        }
    }

    fn labels(self, from: Option<&str>, to: Option<&str>) -> Option<(&'static str, &'static str)> {
        Some((self.label(from?)?, self.label(to?)?))
    }
}

fn render(field: Field, (from, to): (&str, &str)) -> String {
    format!("{}: {from} → {to}", field.prefix())
}

/// `Stage: <from> → <to>` when both codes are known stages.
#[must_use]
pub fn stage_transition(from: Option<&str>, to: Option<&str>) -> Option<String> {
    Field::Stage
        .labels(from, to)
        .map(|pair| render(Field::Stage, pair))
}

/// `Status: <from> → <to>` when both codes are known statuses.
#[must_use]
pub fn status_transition(from: Option<&str>, to: Option<&str>) -> Option<String> {
    Field::Status
        .labels(from, to)
        .map(|pair| render(Field::Status, pair))
}

pub(crate) fn interaction_transition(event: &InteractionEvent) -> Option<String> {
    let stage = || stage_transition(event.stage_from.as_deref(), event.stage_to.as_deref());
    let status = || status_transition(event.status_from.as_deref(), event.status_to.as_deref());

    match event.kind {
        InteractionType::StageChange => stage(),
        InteractionType::StatusChange => status(),
        _ => stage().or_else(status),
    }
}

/// Read one side of a lifecycle snapshot. A plain string is the code
/// itself; an object is searched for the field's keys.
fn snapshot_code(snapshot: &Value, field: Field) -> Option<&str> {
    match snapshot {
        Value::String(code) => Some(code.as_str()),
        Value::Object(map) => field
            .snapshot_keys()
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}

pub(crate) fn lifecycle_transition(event: &LifecycleEvent) -> Option<String> {
    let prev = event.prev.as_ref()?;
    let next = event.next.as_ref()?;
    let pair = |field: Field| field.labels(snapshot_code(prev, field), snapshot_code(next, field));

    let kind = normalize_code(&event.kind);
    if kind.contains("STATUS") {
        return pair(Field::Status).map(|p| render(Field::Status, p));
    }
    if kind.contains("STAGE") {
        return pair(Field::Stage).map(|p| render(Field::Stage, p));
    }

    // Generic event: report whichever field actually moved.
    [Field::Stage, Field::Status].into_iter().find_map(|field| {
        pair(field)
            .filter(|(from, to)| from != to)
            .map(|p| render(field, p))
    })
}
