use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{PipelineStage, StatusFilter};

/// A save from the combined status/stage form. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<StatusFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_stage: Option<PipelineStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dormant_reason: Option<String>,
}

/// Validate a combined update and return it normalized: the reason trimmed,
/// and dropped when blank.
///
/// # Errors
///
/// - [`ValidationError::NoChanges`] when neither status nor stage is set.
/// - [`ValidationError::MissingDormantReason`] when the new stage is dormant
///   and no reason was given.
pub fn validate_combined_update(
    update: &CombinedUpdate,
) -> Result<CombinedUpdate, ValidationError> {
    if update.new_status.is_none() && update.new_stage.is_none() {
        return Err(ValidationError::NoChanges);
    }

    let reason = update
        .dormant_reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    match update.new_stage {
        Some(stage) if stage.is_dormant() && reason.is_none() => {
            return Err(ValidationError::MissingDormantReason { stage });
        }
        _ => {}
    }

    Ok(CombinedUpdate {
        new_status: update.new_status,
        new_stage: update.new_stage,
        dormant_reason: reason,
    })
}
