use crate::model::{PipelineStage, StatusFilter, normalize_code};

/// Status the caller writes when [`evaluate_auto_open`] fires.
pub const AUTO_OPEN_STATUS: StatusFilter = StatusFilter::Open;

/// Whether moving to `proposed_stage` should also open the lead.
///
/// True iff the previous status is `PENDING` or `ASSIGNED` and the proposed
/// stage is `FIRST_TALK_DONE`, compared case-insensitively. Inputs are raw
/// strings because the previous status may be any workflow value the
/// backend holds, not only a known [`StatusFilter`].
#[must_use]
pub fn evaluate_auto_open(previous_status: &str, proposed_stage: &str) -> bool {
    let status = normalize_code(previous_status);
    let opens_from =
        status == StatusFilter::Pending.as_str() || status == StatusFilter::Assigned.as_str();
    opens_from && normalize_code(proposed_stage) == PipelineStage::FirstTalkDone.as_str()
}
