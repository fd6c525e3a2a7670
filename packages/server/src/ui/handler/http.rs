//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::domain::Session;
use crate::infrastructure::dto::http::{OpenQuestionSummaryDto, SessionSummaryDto};
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get a summary of the running session
pub async fn get_session_summary(State(state): State<Arc<AppState>>) -> Json<SessionSummaryDto> {
    let session = state.get_session_state_usecase.execute().await;

    // Domain Model から DTO への変換
    let open_question = session.open.as_ref().map(|open| OpenQuestionSummaryDto {
        id: open.question.id.as_str().to_string(),
        text: open.question.text.clone(),
        sequence_number: open.sequence_number,
        remaining_secs: open.remaining_secs,
        answer_count: session.ledger.size(&open.question.id),
    });

    Json(SessionSummaryDto {
        participants: session.roster.respondent_names(),
        open_question,
        questions_asked: session.sequence.current(),
    })
}

/// Debug endpoint to get current session state (for testing purposes)
pub async fn debug_session_state(State(state): State<Arc<AppState>>) -> Json<Session> {
    let session = state.get_session_state_usecase.execute().await;
    Json(session)
}
