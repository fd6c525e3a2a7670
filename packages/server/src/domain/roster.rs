//! Roster of connected participants.
//!
//! Tracks who is currently connected and with which role, keyed by
//! connection identity. All operations are total functions over the
//! current roster; there are no error cases.

use serde::{Deserialize, Serialize};

use super::entity::Participant;
use super::value_object::{ConnectionId, Role};

/// Connected-participant bookkeeping.
///
/// Backed by a `Vec` so that `respondent_names` reflects insertion order
/// of the current roster. Order is only used for display, it carries no
/// semantic guarantee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            participants: Vec::new(),
        }
    }

    /// Insert the participant, replacing any existing record with the
    /// same connection id.
    pub fn join(&mut self, participant: Participant) {
        self.participants
            .retain(|p| p.connection_id != participant.connection_id);
        self.participants.push(participant);
    }

    /// Delete the participant with the given connection id. Idempotent.
    pub fn remove(&mut self, connection_id: &ConnectionId) {
        self.participants
            .retain(|p| &p.connection_id != connection_id);
    }

    /// Remove the first respondent with the given display name and
    /// return its connection id so the caller can force-disconnect that
    /// connection. Returns `None` (no-op) if no such respondent exists.
    pub fn remove_by_display_name(&mut self, display_name: &str) -> Option<ConnectionId> {
        let position = self
            .participants
            .iter()
            .position(|p| p.role == Role::Respondent && p.display_name.as_str() == display_name)?;
        Some(self.participants.remove(position).connection_id)
    }

    /// Number of participants with role respondent.
    pub fn respondent_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.role == Role::Respondent)
            .count()
    }

    /// Display names of all respondents, in insertion order of the
    /// current roster.
    pub fn respondent_names(&self) -> Vec<String> {
        self.participants
            .iter()
            .filter(|p| p.role == Role::Respondent)
            .map(|p| p.display_name.as_str().to_string())
            .collect()
    }

    /// Look up a participant by connection id.
    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    /// All current participants, in insertion order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }
}
