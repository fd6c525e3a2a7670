//! WebSocket message DTOs.
//!
//! Wire format: every message carries a kebab-case `type` tag; field
//! names are camelCase. Outbound messages are one struct per type with
//! an explicit `r#type` field; inbound client messages are parsed
//! through the internally tagged `ClientMessage` enum.

use serde::{Deserialize, Serialize};

/// Message type tags shared by both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    ParticipantsUpdate,
    QuestionStatus,
    QuestionStarted,
    TimeUpdate,
    PollResults,
    QuestionError,
    ParticipantRemoved,
    ChatMessage,
}

/// Question as it travels over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    /// Time limit in seconds
    pub time_limit: u32,
}

/// Per-option tally inside a poll-results message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTallyDto {
    pub option: String,
    pub count: usize,
    pub percentage: u32,
}

/// Current respondent display names, sent to everyone on roster changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantsUpdateMessage {
    pub r#type: MessageType,
    pub participants: Vec<String>,
}

/// Whether a new question may currently be started, sent to moderators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatusMessage {
    pub r#type: MessageType,
    pub can_ask_new: bool,
}

/// A question was started, sent to respondents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStartedMessage {
    pub r#type: MessageType,
    pub question: QuestionDto,
    pub sequence_number: u32,
}

/// Remaining seconds, sent to everyone at start and on every tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeUpdateMessage {
    pub r#type: MessageType,
    pub remaining: u32,
}

/// Aggregated results, sent to everyone exactly once per closed question
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsMessage {
    pub r#type: MessageType,
    pub results: Vec<OptionTallyDto>,
    pub sequence_number: u32,
    pub question_id: String,
    pub question_text: String,
}

/// Illegal start attempt, sent to the requesting moderator only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionErrorMessage {
    pub r#type: MessageType,
    pub message: String,
}

/// Sent to a removed respondent right before its forced disconnection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRemovedMessage {
    pub r#type: MessageType,
}

/// Chat payload relayed verbatim to everyone
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRelayMessage {
    pub r#type: MessageType,
    pub payload: serde_json::Value,
}

/// Inbound messages from clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Start a question (moderator only)
    StartQuestion { question: QuestionDto },
    /// Submit an answer for the open question
    SubmitAnswer {
        question_id: String,
        respondent_name: String,
        answer: String,
    },
    /// Remove a respondent by display name (moderator only)
    RemoveParticipant { display_name: String },
    /// Chat payload, relayed uninterpreted
    ChatMessage { payload: serde_json::Value },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_submit_answer_parses_camel_case() {
        // テスト項目: submit-answer の camelCase フィールドが解釈される
        // given (前提条件):
        let json = r#"{"type":"submit-answer","questionId":"q1","respondentName":"Alice","answer":"A"}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::SubmitAnswer {
                question_id: "q1".to_string(),
                respondent_name: "Alice".to_string(),
                answer: "A".to_string(),
            }
        );
    }

    #[test]
    fn test_inbound_start_question_parses_nested_question() {
        // テスト項目: start-question の question オブジェクトが解釈される
        // given (前提条件):
        let json = r#"{"type":"start-question","question":{"id":"q1","text":"A or B?","options":["A","B"],"timeLimit":5}}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        let ClientMessage::StartQuestion { question } = message else {
            panic!("expected start-question");
        };
        assert_eq!(question.id, "q1");
        assert_eq!(question.time_limit, 5);
        assert_eq!(question.options, vec!["A", "B"]);
    }

    #[test]
    fn test_inbound_unknown_type_is_rejected() {
        // テスト項目: 未知の type タグはパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"shutdown-server"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_outbound_poll_results_serializes_camel_case() {
        // テスト項目: poll-results が camelCase + kebab-case タグで出力される
        // given (前提条件):
        let message = PollResultsMessage {
            r#type: MessageType::PollResults,
            results: vec![OptionTallyDto {
                option: "A".to_string(),
                count: 1,
                percentage: 100,
            }],
            sequence_number: 1,
            question_id: "q1".to_string(),
            question_text: "A or B?".to_string(),
        };

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""type":"poll-results""#));
        assert!(json.contains(r#""sequenceNumber":1"#));
        assert!(json.contains(r#""questionId":"q1""#));
        assert!(json.contains(r#""percentage":100"#));
    }
}
