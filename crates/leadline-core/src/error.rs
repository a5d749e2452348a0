use std::fmt;

use crate::model::PipelineStage;

/// Machine-readable error codes for callers that branch on failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputParseError,
    LeadNotFound,
    MissingDormantReason,
    NoChanges,
    StageRegression,
    InvalidEnumValue,
    StoreConflict,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InputParseError => "E1004",
            Self::LeadNotFound => "E2001",
            Self::MissingDormantReason => "E2002",
            Self::NoChanges => "E2003",
            Self::StageRegression => "E2004",
            Self::InvalidEnumValue => "E2005",
            Self::StoreConflict => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputParseError => "Input file parse error",
            Self::LeadNotFound => "Lead not found",
            Self::MissingDormantReason => "Dormant reason required",
            Self::NoChanges => "No changes to save",
            Self::StageRegression => "Stage cannot move backwards",
            Self::InvalidEnumValue => "Invalid stage/status value",
            Self::StoreConflict => "Lead store rejected the write",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .leadline/config.toml and retry."),
            Self::InputParseError => Some("Check that the file holds a JSON array of records."),
            Self::LeadNotFound => None,
            Self::MissingDormantReason => {
                Some("Record why the lead went dormant before moving it.")
            }
            Self::NoChanges => Some("Pick a new status or stage, or cancel."),
            Self::StageRegression => {
                Some("Early stages are closed once a lead has progressed past them.")
            }
            Self::InvalidEnumValue => Some("Use one of the documented stage/status codes."),
            Self::StoreConflict => Some("Re-fetch the lead and retry the change."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejection returned by the lead state machine.
///
/// None of these leave partial state behind: the machine only decides, the
/// store writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("a dormant reason is required to move a lead to {stage}")]
    MissingDormantReason { stage: PipelineStage },

    #[error("nothing to save: no status or stage change was given")]
    NoChanges,

    #[error("cannot move a lead from {from} back to {to}")]
    StageRegression {
        from: PipelineStage,
        to: PipelineStage,
    },
}

impl ValidationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingDormantReason { .. } => ErrorCode::MissingDormantReason,
            Self::NoChanges => ErrorCode::NoChanges,
            Self::StageRegression { .. } => ErrorCode::StageRegression,
        }
    }
}

/// Failure reported by a [`LeadStore`](crate::store::LeadStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("lead not found: {lead_id}")]
    LeadNotFound { lead_id: String },

    #[error("lead {lead_id} could not be updated: {reason}")]
    Conflict { lead_id: String, reason: String },
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::LeadNotFound { .. } => ErrorCode::LeadNotFound,
            Self::Conflict { .. } => ErrorCode::StoreConflict,
        }
    }
}

/// Error from running a transition through the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl WorkflowError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::Store(e) => e.code(),
        }
    }

    /// Remediation text for terminal output.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::ConfigParseError,
        ErrorCode::InputParseError,
        ErrorCode::LeadNotFound,
        ErrorCode::MissingDormantReason,
        ErrorCode::NoChanges,
        ErrorCode::StageRegression,
        ErrorCode::InvalidEnumValue,
        ErrorCode::StoreConflict,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn validation_errors_map_to_codes() {
        let err = ValidationError::MissingDormantReason {
            stage: PipelineStage::Hibernated,
        };
        assert_eq!(err.code(), ErrorCode::MissingDormantReason);
        assert!(err.to_string().contains("HIBERNATED"));
        assert_eq!(ValidationError::NoChanges.code().code(), "E2003");
    }

    #[test]
    fn workflow_error_suggestion_falls_back_to_message() {
        let err = WorkflowError::from(StoreError::LeadNotFound {
            lead_id: "lead-404".into(),
        });
        assert_eq!(err.error_code(), ErrorCode::LeadNotFound);
        assert_eq!(err.suggestion(), "Lead not found");
        assert!(err.to_string().contains("lead-404"));
    }
}
