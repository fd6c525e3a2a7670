//! Answer ledger: per-question answer bookkeeping.
//!
//! One `AnswerSet` per question id, one entry per respondent display
//! name. First submission wins; later submissions from the same
//! respondent for the same question are silently ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value_object::QuestionId;

/// Mapping from respondent display name to the chosen option, scoped to
/// one question.
///
/// Keyed by display name, which is not required to be unique: two
/// respondents sharing a name share one slot here, so the answered
/// count can undercount real participants. Known ambiguity, kept as-is.
pub type AnswerSet = HashMap<String, String>;

/// Ledger of answer sets for all questions asked so far.
///
/// Entries are added only while the owning question is open; sealing
/// after close is enforced by the state machine never routing late
/// submissions to a closed question's id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerLedger {
    sets: HashMap<QuestionId, AnswerSet>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Create an empty answer set for the question id.
    ///
    /// Ids are caller-generated; the caller must guarantee uniqueness.
    /// Opening an id twice keeps the existing set untouched.
    pub fn open(&mut self, question_id: QuestionId) {
        self.sets.entry(question_id).or_default();
    }

    /// Record an answer. Returns `true` if the answer was accepted.
    ///
    /// Returns `false` without mutation when no set exists for the id or
    /// the respondent already has an entry (silent idempotent-ignore).
    pub fn submit(&mut self, question_id: &QuestionId, respondent_name: &str, answer: &str) -> bool {
        let Some(set) = self.sets.get_mut(question_id) else {
            return false;
        };
        if set.contains_key(respondent_name) {
            return false;
        }
        set.insert(respondent_name.to_string(), answer.to_string());
        true
    }

    /// Number of answers recorded for the question id (0 if unknown).
    pub fn size(&self, question_id: &QuestionId) -> usize {
        self.sets.get(question_id).map_or(0, HashMap::len)
    }

    /// Snapshot of the answer set for the question id (empty if unknown).
    pub fn snapshot(&self, question_id: &QuestionId) -> AnswerSet {
        self.sets.get(question_id).cloned().unwrap_or_default()
    }
}
