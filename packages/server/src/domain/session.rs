//! Session aggregate: the state the whole Q&A session lives in.
//!
//! Owns the roster, the answer ledger, the currently open question and
//! the sequence counter. Exactly one question may be open at any time;
//! that is the central invariant of the system and it is protected here
//! by `open` being an `Option`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::answer_ledger::AnswerLedger;
use super::entity::Question;
use super::roster::Roster;
use super::value_object::QuestionId;

/// Handle to the shared session state.
///
/// All inbound events and the countdown's tick callback mutate the
/// session through this single mutex, which makes them one effective
/// serialization domain: no two mutations interleave mid-operation.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Monotonically increasing question sequence counter.
///
/// Incremented once per started question; labels questions in display
/// order independent of their caller-generated ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceCounter(u32);

impl SequenceCounter {
    pub fn new() -> Self {
        Self(0)
    }

    /// Allocate the next sequence number (first call returns 1).
    pub fn next(&mut self) -> u32 {
        self.0 += 1;
        self.0
    }

    pub fn current(&self) -> u32 {
        self.0
    }
}

/// The currently open question together with its live countdown state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenQuestion {
    pub question: Question,
    /// Sequence number assigned when the question was started.
    pub sequence_number: u32,
    /// Remaining seconds, mirrored from the countdown on every tick so
    /// the completeness predicate can read it.
    pub remaining_secs: u32,
}

/// Shared mutable session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub roster: Roster,
    pub ledger: AnswerLedger,
    /// The unique open question, if any.
    pub open: Option<OpenQuestion>,
    pub sequence: SequenceCounter,
}

impl Session {
    pub fn new() -> Self {
        Self {
            roster: Roster::new(),
            ledger: AnswerLedger::new(),
            open: None,
            sequence: SequenceCounter::new(),
        }
    }

    /// Completeness predicate: the open question is complete when every
    /// respondent has answered or the countdown reached zero.
    ///
    /// A question may remain nominally open yet already be complete
    /// (closure processing hasn't run, or the respondent count dropped
    /// below the answer count); such a question no longer blocks a new
    /// start.
    pub fn open_question_complete(&self) -> bool {
        match &self.open {
            None => true,
            Some(open) => {
                self.ledger.size(&open.question.id) >= self.roster.respondent_count()
                    || open.remaining_secs == 0
            }
        }
    }

    /// Whether a new question may currently be started.
    pub fn can_start_question(&self) -> bool {
        self.open_question_complete()
    }

    /// Id of the open question, if any.
    pub fn open_question_id(&self) -> Option<&QuestionId> {
        self.open.as_ref().map(|open| &open.question.id)
    }
}
