//! Lead state machine.
//!
//! A lead sits at one of nine pipeline stages and, independently, one status
//! filter. The machine decides whether a proposed move is allowed and, when
//! it is, returns the change together with the `STAGE_CHANGE` or
//! `STATUS_CHANGE` interaction that records it. It performs no writes; see
//! [`crate::workflow`] for the path through a lead store.
//!
//! Guards:
//! - entering a dormant stage needs a non-blank reason
//! - optionally ([`StagePolicy::reject_regression`]) a progressed lead may
//!   not return to `NEW_LEAD`/`FIRST_TALK_DONE`
//!
//! The auto-open rule ([`evaluate_auto_open`]) tells the caller when a stage
//! move should be followed by a status move to `OPEN`.

pub mod auto_open;
pub mod combined;
pub mod machine;
pub mod options;

pub use auto_open::{AUTO_OPEN_STATUS, evaluate_auto_open};
pub use combined::{CombinedUpdate, validate_combined_update};
pub use machine::{Accepted, Actor, LeadChange, StagePolicy, StateMachine, TransitionContext};
pub use options::{selectable_next_stages, selectable_statuses};
