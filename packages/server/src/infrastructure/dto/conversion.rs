//! Conversion logic between DTOs and domain types.

use crate::domain::{Notification, OptionTally, Question, QuestionId, ValidationError};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::QuestionDto> for Question {
    type Error = ValidationError;

    fn try_from(value: dto::QuestionDto) -> Result<Self, Self::Error> {
        Ok(Question::new(
            QuestionId::new(value.id)?,
            value.text,
            value.options,
            value.time_limit,
        ))
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Question> for dto::QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.as_str().to_string(),
            text: question.text.clone(),
            options: question.options.clone(),
            time_limit: question.time_limit_secs,
        }
    }
}

impl From<&OptionTally> for dto::OptionTallyDto {
    fn from(tally: &OptionTally) -> Self {
        Self {
            option: tally.option.clone(),
            count: tally.count,
            percentage: tally.percentage,
        }
    }
}

/// Render a domain notification as its wire JSON.
///
/// Serialization of these DTOs cannot fail; the `unwrap` mirrors the
/// serializer usage across the ui layer.
pub fn notification_to_json(notification: &Notification) -> String {
    match notification {
        Notification::ParticipantsUpdate { names } => {
            serde_json::to_string(&dto::ParticipantsUpdateMessage {
                r#type: dto::MessageType::ParticipantsUpdate,
                participants: names.clone(),
            })
            .unwrap()
        }
        Notification::QuestionStatus { can_ask_new } => {
            serde_json::to_string(&dto::QuestionStatusMessage {
                r#type: dto::MessageType::QuestionStatus,
                can_ask_new: *can_ask_new,
            })
            .unwrap()
        }
        Notification::QuestionStarted {
            question,
            sequence_number,
        } => serde_json::to_string(&dto::QuestionStartedMessage {
            r#type: dto::MessageType::QuestionStarted,
            question: question.into(),
            sequence_number: *sequence_number,
        })
        .unwrap(),
        Notification::TimeUpdate { remaining } => serde_json::to_string(&dto::TimeUpdateMessage {
            r#type: dto::MessageType::TimeUpdate,
            remaining: *remaining,
        })
        .unwrap(),
        Notification::PollResults {
            results,
            sequence_number,
            question_id,
            question_text,
        } => serde_json::to_string(&dto::PollResultsMessage {
            r#type: dto::MessageType::PollResults,
            results: results.iter().map(Into::into).collect(),
            sequence_number: *sequence_number,
            question_id: question_id.as_str().to_string(),
            question_text: question_text.clone(),
        })
        .unwrap(),
        Notification::QuestionError { message } => {
            serde_json::to_string(&dto::QuestionErrorMessage {
                r#type: dto::MessageType::QuestionError,
                message: message.clone(),
            })
            .unwrap()
        }
        Notification::ParticipantRemoved => {
            serde_json::to_string(&dto::ParticipantRemovedMessage {
                r#type: dto::MessageType::ParticipantRemoved,
            })
            .unwrap()
        }
        Notification::Chat { payload } => serde_json::to_string(&dto::ChatRelayMessage {
            r#type: dto::MessageType::ChatMessage,
            payload: payload.clone(),
        })
        .unwrap(),
    }
}
