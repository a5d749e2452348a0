use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient, timestamp};

/// Metadata keys that may carry the author's display name, in lookup order.
const METADATA_AUTHOR_KEYS: [&str; 6] = [
    "authorName",
    "author_name",
    "author",
    "actorName",
    "actor_name",
    "actor",
];

/// An entry from the generic lifecycle/event log service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifecycleEvent {
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::text_or_default")]
    pub kind: String,
    #[serde(
        deserialize_with = "timestamp::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub occurred_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(
        deserialize_with = "lenient::object",
        skip_serializing_if = "Map::is_empty"
    )]
    pub metadata: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Value>,
}

impl LifecycleEvent {
    /// Author or actor name recorded in the free-form metadata.
    ///
    /// Each key may hold a plain string or an object with a `name` (or
    /// `displayName`) field. Blank values are skipped.
    #[must_use]
    pub fn metadata_author(&self) -> Option<&str> {
        METADATA_AUTHOR_KEYS.iter().find_map(|key| {
            let value = self.metadata.get(*key)?;
            let name = match value {
                Value::String(s) => Some(s.as_str()),
                Value::Object(obj) => obj
                    .get("name")
                    .or_else(|| obj.get("displayName"))
                    .and_then(Value::as_str),
                _ => None,
            }?;
            let name = name.trim();
            (!name.is_empty()).then_some(name)
        })
    }

    /// Follow-up date carried in metadata, if any.
    #[must_use]
    pub fn metadata_follow_up(&self) -> Option<&str> {
        ["nextActionDueAt", "next_action_due_at", "nextFollowUpAt"]
            .iter()
            .find_map(|key| self.metadata.get(*key).and_then(Value::as_str))
    }
}
