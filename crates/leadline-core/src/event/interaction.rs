use serde::{Deserialize, Serialize};

use super::{lenient, timestamp};
use super::types::InteractionType;

/// A structured interaction from the interaction history service.
///
/// Stage and status codes are kept as raw strings: history written by
/// older clients may carry values that no longer parse, and the timeline
/// still has to show those rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionEvent {
    /// `None` until the lead store assigns one.
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::text_or_default")]
    pub lead_id: String,
    #[serde(rename = "type", deserialize_with = "lenient::null_as_default")]
    pub kind: InteractionType,
    #[serde(
        deserialize_with = "timestamp::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurred_at: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_to: Option<String>,
    #[serde(
        deserialize_with = "timestamp::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_action_due_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormant_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(
        deserialize_with = "lenient::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
