//! Interaction type codes.
//!
//! The backend owns this vocabulary and adds to it without notice, so
//! unrecognised codes are preserved verbatim in [`InteractionType::Other`]
//! instead of failing deserialization of the whole history page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::normalize_code;

/// Kind of a structured interaction recorded against a lead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InteractionType {
    /// Pipeline stage moved; carries `stageFrom`/`stageTo`.
    StageChange,
    /// Status filter moved; carries `statusFrom`/`statusTo`.
    StatusChange,
    Call,
    Meeting,
    Email,
    Message,
    #[default]
    Note,
    FollowUp,
    /// Any code not in the catalog above, kept as received.
    Other(String),
}

impl InteractionType {
    /// The known interaction types in catalog order.
    pub const KNOWN: [Self; 8] = [
        Self::StageChange,
        Self::StatusChange,
        Self::Call,
        Self::Meeting,
        Self::Email,
        Self::Message,
        Self::Note,
        Self::FollowUp,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::StageChange => "STAGE_CHANGE",
            Self::StatusChange => "STATUS_CHANGE",
            Self::Call => "CALL",
            Self::Meeting => "MEETING",
            Self::Email => "EMAIL",
            Self::Message => "MESSAGE",
            Self::Note => "NOTE",
            Self::FollowUp => "FOLLOW_UP",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_code(s);
        Ok(Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == normalized)
            .unwrap_or_else(|| Self::Other(s.to_string())))
    }
}

impl Serialize for InteractionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InteractionType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_else(|never| match never {}))
    }
}
