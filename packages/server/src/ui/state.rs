//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::BroadcastGateway;
use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetSessionStateUseCase,
    RelayChatUseCase, RemoveParticipantUseCase, StartQuestionUseCase, SubmitAnswerUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// StartQuestionUseCase（質問開始のユースケース）
    pub start_question_usecase: Arc<StartQuestionUseCase>,
    /// SubmitAnswerUseCase（回答提出のユースケース）
    pub submit_answer_usecase: Arc<SubmitAnswerUseCase>,
    /// RemoveParticipantUseCase（回答者削除のユースケース）
    pub remove_participant_usecase: Arc<RemoveParticipantUseCase>,
    /// RelayChatUseCase（チャット中継のユースケース）
    pub relay_chat_usecase: Arc<RelayChatUseCase>,
    /// GetSessionStateUseCase（セッション状態取得のユースケース）
    pub get_session_state_usecase: Arc<GetSessionStateUseCase>,
    /// BroadcastGateway（question-error の個別送信に使う）
    pub gateway: Arc<dyn BroadcastGateway>,
}
