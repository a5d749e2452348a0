//! The lead store contract and an in-process implementation.
//!
//! The real store lives behind the backend API. [`MemoryLeadStore`] exists
//! for tests and the CLI, and follows the same contract: a commit writes the
//! lead and its event together or not at all.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::event::InteractionEvent;
use crate::lifecycle::{Accepted, LeadChange};
use crate::model::Lead;

/// What a successful commit wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub lead: Lead,
    /// The event as stored, with its assigned id.
    pub event: InteractionEvent,
}

/// Supplies lead aggregates and accepts transitions.
pub trait LeadStore {
    /// Load the current aggregate.
    ///
    /// # Errors
    ///
    /// [`StoreError::LeadNotFound`] when no lead has this id.
    fn load(&self, lead_id: &str) -> Result<Lead, StoreError>;

    /// Persist an accepted change and its event atomically.
    ///
    /// # Errors
    ///
    /// Implementation-defined; nothing is written when an error is returned.
    fn commit(&mut self, lead_id: &str, accepted: &Accepted) -> Result<Commit, StoreError>;
}

/// In-memory store keyed by lead id.
///
/// Commits are checked against the change's `from` value: if the stored
/// lead has moved on since the proposal was built, the commit fails with
/// [`StoreError::Conflict`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLeadStore {
    leads: BTreeMap<String, Lead>,
    events: Vec<InteractionEvent>,
}

impl MemoryLeadStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a lead.
    pub fn insert(&mut self, lead: Lead) {
        self.leads.insert(lead.id.clone(), lead);
    }

    /// Stored events for one lead, in commit order.
    #[must_use]
    pub fn events_for(&self, lead_id: &str) -> Vec<InteractionEvent> {
        self.events
            .iter()
            .filter(|e| e.lead_id == lead_id)
            .cloned()
            .collect()
    }
}

impl LeadStore for MemoryLeadStore {
    fn load(&self, lead_id: &str) -> Result<Lead, StoreError> {
        self.leads
            .get(lead_id)
            .cloned()
            .ok_or_else(|| StoreError::LeadNotFound {
                lead_id: lead_id.to_string(),
            })
    }

    fn commit(&mut self, lead_id: &str, accepted: &Accepted) -> Result<Commit, StoreError> {
        let current = self.load(lead_id)?;

        let stale = match accepted.change() {
            LeadChange::Stage { from, .. } => current.pipeline_stage != *from,
            LeadChange::Status { from, .. } => current.status_filter != *from,
        };
        if stale {
            return Err(StoreError::Conflict {
                lead_id: lead_id.to_string(),
                reason: "lead changed since the proposal was built".to_string(),
            });
        }

        let updated = current.apply(accepted.change(), accepted.occurred_at());
        let mut event = accepted.event().clone();
        event.id = Some(format!("{lead_id}-evt-{}", self.events.len() + 1));

        self.leads.insert(lead_id.to_string(), updated.clone());
        self.events.push(event.clone());

        Ok(Commit {
            lead: updated,
            event,
        })
    }
}
