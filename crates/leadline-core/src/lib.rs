//! leadline-core library.
//!
//! Two pure components sit at the center:
//!
//! - [`lifecycle::StateMachine`] validates pipeline-stage and status-filter
//!   moves and pairs every accepted move with the interaction event that
//!   records it. [`workflow`] runs a proposal against a [`store::LeadStore`]
//!   and applies the auto-open follow-up.
//! - [`timeline::reconcile`] merges interactions, remarks, and lifecycle-log
//!   events into one deduplicated, newest-first feed.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for domain failures ([`error`]), each
//!   mapped to a stable [`error::ErrorCode`]; `anyhow::Result` at the
//!   config-loading edge.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`). The core
//!   never installs a subscriber.
//! - **Time**: callers supply every instant; nothing here reads a clock.

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod timeline;
pub mod workflow;

pub use error::{ErrorCode, StoreError, ValidationError, WorkflowError};
pub use lifecycle::{Accepted, StateMachine, TransitionContext, evaluate_auto_open};
pub use model::{Lead, PipelineStage, StatusFilter};
pub use timeline::{ReconcileContext, TimelineEntry, Viewer, reconcile};
