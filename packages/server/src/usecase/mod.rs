//! UseCase 層
//!
//! インバウンドイベント 1 種につき 1 つの UseCase。すべての UseCase は
//! セッションの mutex を操作の間ずっと保持し、状態遷移と通知を
//! 原子的に行う（直列化ドメインの保証）。

mod close_question;
mod connect_participant;
mod disconnect_participant;
mod error;
mod get_session_state;
mod relay_chat;
mod remove_participant;
mod start_question;
mod submit_answer;

pub use close_question::CloseQuestionUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::StartQuestionError;
pub use get_session_state::GetSessionStateUseCase;
pub use relay_chat::RelayChatUseCase;
pub use remove_participant::RemoveParticipantUseCase;
pub use start_question::StartQuestionUseCase;
pub use submit_answer::{SubmitAnswerUseCase, SubmitOutcome};
