//! Which values a form should offer. Presentation filters only; the state
//! machine does not reject what these hide.

use crate::model::{PipelineStage, StatusFilter};

/// Stages offered in the "next stage" dropdown for a lead at `current`.
///
/// Once a lead has left `NEW_LEAD`/`FIRST_TALK_DONE` those two are no longer
/// offered.
#[must_use]
pub fn selectable_next_stages(current: PipelineStage) -> Vec<PipelineStage> {
    PipelineStage::ALL
        .into_iter()
        .filter(|stage| current.is_early() || !stage.is_early())
        .collect()
}

/// Status values offered for selection. Legacy values are display-only.
#[must_use]
pub const fn selectable_statuses() -> &'static [StatusFilter] {
    &StatusFilter::ACTIVE
}
