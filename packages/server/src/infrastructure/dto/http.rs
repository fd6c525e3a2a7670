//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Summary of the running session for `GET /api/session`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummaryDto {
    /// Current respondent display names, in join order
    pub participants: Vec<String>,
    /// The open question, if any
    pub open_question: Option<OpenQuestionSummaryDto>,
    /// How many questions have been started so far
    pub questions_asked: u32,
}

/// Summary of the currently open question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenQuestionSummaryDto {
    pub id: String,
    pub text: String,
    pub sequence_number: u32,
    pub remaining_secs: u32,
    pub answer_count: usize,
}
