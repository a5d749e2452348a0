//! Activity records for a lead, as delivered by the history services.
//!
//! Three collections describe what happened to a lead, each fetched and
//! paginated independently:
//!
//! - [`InteractionEvent`]: structured interactions, including the
//!   `STAGE_CHANGE`/`STATUS_CHANGE` events the state machine emits
//! - [`RemarkEntry`]: editable free-text remarks, optionally linked to an
//!   interaction
//! - [`LifecycleEvent`]: the generic event log with free-form metadata
//!
//! All three keep their timestamps as raw text (see [`timestamp`]); the
//! timeline engine decides what parses.

pub mod interaction;
mod lenient;
pub mod log;
pub mod remark;
pub mod timestamp;
pub mod types;

pub use interaction::InteractionEvent;
pub use log::LifecycleEvent;
pub use remark::RemarkEntry;
pub use timestamp::parse_timestamp;
pub use types::InteractionType;
