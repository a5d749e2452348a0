use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ParseEnumError, normalize_code};

/// The nine sales-pipeline stages a lead moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    NewLead,
    FirstTalkDone,
    FollowingUp,
    ClientInterested,
    AccountOpened,
    NoResponseDormant,
    NotInterestedDormant,
    RiskyClientDormant,
    Hibernated,
}

impl PipelineStage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 9] = [
        Self::NewLead,
        Self::FirstTalkDone,
        Self::FollowingUp,
        Self::ClientInterested,
        Self::AccountOpened,
        Self::NoResponseDormant,
        Self::NotInterestedDormant,
        Self::RiskyClientDormant,
        Self::Hibernated,
    ];

    /// Wire code, e.g. `FIRST_TALK_DONE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewLead => "NEW_LEAD",
            Self::FirstTalkDone => "FIRST_TALK_DONE",
            Self::FollowingUp => "FOLLOWING_UP",
            Self::ClientInterested => "CLIENT_INTERESTED",
            Self::AccountOpened => "ACCOUNT_OPENED",
            Self::NoResponseDormant => "NO_RESPONSE_DORMANT",
            Self::NotInterestedDormant => "NOT_INTERESTED_DORMANT",
            Self::RiskyClientDormant => "RISKY_CLIENT_DORMANT",
            Self::Hibernated => "HIBERNATED",
        }
    }

    /// Human label shown in dropdowns and the activity feed.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewLead => "New Lead",
            Self::FirstTalkDone => "First Talk Done",
            Self::FollowingUp => "Following Up",
            Self::ClientInterested => "Client Interested",
            Self::AccountOpened => "Account Opened",
            Self::NoResponseDormant => "No Response (Dormant)",
            Self::NotInterestedDormant => "Not Interested (Dormant)",
            Self::RiskyClientDormant => "Risky Client (Dormant)",
            Self::Hibernated => "Hibernated",
        }
    }

    /// Dormant stages require a recorded reason on entry.
    #[must_use]
    pub const fn is_dormant(self) -> bool {
        matches!(
            self,
            Self::NoResponseDormant
                | Self::NotInterestedDormant
                | Self::RiskyClientDormant
                | Self::Hibernated
        )
    }

    /// The two opening stages. Once a lead has left them they stop being
    /// offered as next-stage options.
    #[must_use]
    pub const fn is_early(self) -> bool {
        matches!(self, Self::NewLead | Self::FirstTalkDone)
    }

    /// Label for a raw code, or `None` when the code is not a known stage.
    #[must_use]
    pub fn label_for(code: &str) -> Option<&'static str> {
        code.parse::<Self>().ok().map(Self::label)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_code(s);
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| ParseEnumError {
                expected: "pipeline stage",
                got: s.to_string(),
            })
    }
}
