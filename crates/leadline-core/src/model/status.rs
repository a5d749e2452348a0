use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize_code};

/// Priority/disposition classification, orthogonal to the pipeline stage.
///
/// The first seven variants are the active filter values. The remaining
/// ones are legacy workflow statuses still present on older leads; they are
/// kept so those leads deserialize and display, and because the auto-open
/// rule reads `PENDING`/`ASSIGNED` and writes `OPEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    FutureInterested,
    HighPriority,
    LowPriority,
    NeedClarification,
    NotEligible,
    NotInterested,
    OnProcess,
    // legacy
    Pending,
    Assigned,
    Open,
    OnHold,
    Closed,
}

impl StatusFilter {
    /// Active filter values, in dropdown order.
    pub const ACTIVE: [Self; 7] = [
        Self::FutureInterested,
        Self::HighPriority,
        Self::LowPriority,
        Self::NeedClarification,
        Self::NotEligible,
        Self::NotInterested,
        Self::OnProcess,
    ];

    pub const LEGACY: [Self; 5] = [
        Self::Pending,
        Self::Assigned,
        Self::Open,
        Self::OnHold,
        Self::Closed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FutureInterested => "FUTURE_INTERESTED",
            Self::HighPriority => "HIGH_PRIORITY",
            Self::LowPriority => "LOW_PRIORITY",
            Self::NeedClarification => "NEED_CLARIFICATION",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::NotInterested => "NOT_INTERESTED",
            Self::OnProcess => "ON_PROCESS",
            Self::Pending => "PENDING",
            Self::Assigned => "ASSIGNED",
            Self::Open => "OPEN",
            Self::OnHold => "ON_HOLD",
            Self::Closed => "CLOSED",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FutureInterested => "Future Interested",
            Self::HighPriority => "High Priority",
            Self::LowPriority => "Low Priority",
            Self::NeedClarification => "Need Clarification",
            Self::NotEligible => "Not Eligible",
            Self::NotInterested => "Not Interested",
            Self::OnProcess => "On Process",
            Self::Pending => "Pending",
            Self::Assigned => "Assigned",
            Self::Open => "Open",
            Self::OnHold => "On Hold",
            Self::Closed => "Closed",
        }
    }

    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Assigned | Self::Open | Self::OnHold | Self::Closed
        )
    }

    /// Label for a raw code, or `None` when the code is not a known status.
    #[must_use]
    pub fn label_for(code: &str) -> Option<&'static str> {
        code.parse::<Self>().ok().map(Self::label)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_code(s);
        Self::ACTIVE
            .into_iter()
            .chain(Self::LEGACY)
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "status filter",
                got: s.to_string(),
            })
    }
}
