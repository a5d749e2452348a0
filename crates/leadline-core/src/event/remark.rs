use serde::{Deserialize, Serialize};

use super::{lenient, timestamp};

/// A free-text remark on a lead.
///
/// `associated_interaction_id` is a weak reference: the remark is the
/// editable note of that interaction, but the interaction may be missing
/// from a given fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemarkEntry {
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<String>,
    #[serde(
        deserialize_with = "timestamp::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        deserialize_with = "timestamp::deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
    #[serde(
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub associated_interaction_id: Option<String>,
}

impl RemarkEntry {
    /// Linked interaction id, ignoring blank values.
    #[must_use]
    pub fn linked_interaction(&self) -> Option<&str> {
        self.associated_interaction_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// The instant the remark last changed: `updatedAt`, else `createdAt`.
    #[must_use]
    pub fn last_touched_raw(&self) -> Option<&str> {
        self.updated_at
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .or(self.created_at.as_deref())
    }
}
