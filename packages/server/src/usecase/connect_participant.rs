//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 参加（両役割）、回答者リストのブロードキャスト、参加直後の個別通知
//!
//! ### なぜこのテストが必要か
//! - ロスター変更のたびに participants-update が全員へ届くことを保証
//! - 参加したモデレーターに現在の質問開始可否が届くことを確認
//! - 質問の進行中に遅れて参加した回答者に質問が再送されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答者の参加、モデレーターの参加
//! - エッジケース：質問が開いている最中の回答者参加

use std::sync::Arc;

use mondou_shared::time::get_jst_timestamp;

use crate::domain::{
    BroadcastGateway, ConnectionId, DisplayName, GatewayChannel, Notification, Participant, Role,
    SessionHandle, Timestamp,
};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(session: SessionHandle, gateway: Arc<dyn BroadcastGateway>) -> Self {
        Self { session, gateway }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - サーバー側で生成された接続 ID
    /// * `display_name` - 表示名（一意性は強制しない）
    /// * `role` - 役割（moderator / respondent）
    /// * `channel` - この接続へのメッセージ送信用チャンネル
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        role: Role,
        channel: GatewayChannel,
    ) {
        // 1. Gateway に接続を登録（以降の通知が届くようになる）
        self.gateway
            .register(connection_id.clone(), role, channel)
            .await;

        // 2. ロスターへ追加し、回答者リストを全員へ再配信
        let mut session = self.session.lock().await;
        let joined_at = Timestamp::new(get_jst_timestamp());
        session.roster.join(Participant::new(
            connection_id.clone(),
            display_name,
            role,
            joined_at,
        ));
        let names = session.roster.respondent_names();
        self.gateway
            .notify_all(&Notification::ParticipantsUpdate { names })
            .await;

        // 3. 参加直後の個別通知
        match role {
            Role::Moderator => {
                // モデレーターには現在の質問開始可否を伝える
                let status = Notification::QuestionStatus {
                    can_ask_new: session.can_start_question(),
                };
                if let Err(e) = self.gateway.notify_one(&connection_id, &status).await {
                    tracing::warn!(
                        "Failed to send question status to '{}': {}",
                        connection_id.as_str(),
                        e
                    );
                }
            }
            Role::Respondent => {
                // 質問の進行中に参加した回答者には質問を再送する
                if let Some(open) = &session.open {
                    let started = Notification::QuestionStarted {
                        question: open.question.clone(),
                        sequence_number: open.sequence_number,
                    };
                    if let Err(e) = self.gateway.notify_one(&connection_id, &started).await {
                        tracing::warn!(
                            "Failed to replay open question to '{}': {}",
                            connection_id.as_str(),
                            e
                        );
                    }
                }
            }
        }

        tracing::info!(
            "Participant '{}' joined as {}",
            connection_id.as_str(),
            role.as_str()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OpenQuestion, Question, QuestionId};
    use crate::usecase::test_support::{Audience, RecordingGateway, channel, empty_session};

    fn connection_id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn display_name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_respondent_join_broadcasts_participants_update() {
        // テスト項目: 回答者の参加で participants-update が全員へ送られる
        // given (前提条件):
        let session = empty_session();
        let gateway = RecordingGateway::new();
        let usecase = ConnectParticipantUseCase::new(session.clone(), gateway.clone());

        // when (操作):
        usecase
            .execute(
                connection_id("c1"),
                display_name("Alice"),
                Role::Respondent,
                channel(),
            )
            .await;

        // then (期待する結果):
        let broadcasts = gateway.sent_to(Audience::All).await;
        assert_eq!(
            broadcasts,
            vec![Notification::ParticipantsUpdate {
                names: vec!["Alice".to_string()]
            }]
        );
        assert_eq!(session.lock().await.roster.respondent_count(), 1);
    }

    #[tokio::test]
    async fn test_moderator_join_receives_question_status() {
        // テスト項目: 参加したモデレーターに質問開始可否が届く
        // given (前提条件): 質問は開いていない
        let session = empty_session();
        let gateway = RecordingGateway::new();
        let usecase = ConnectParticipantUseCase::new(session, gateway.clone());

        // when (操作):
        usecase
            .execute(
                connection_id("m1"),
                display_name("moderator"),
                Role::Moderator,
                channel(),
            )
            .await;

        // then (期待する結果): 本人のみに canAskNew=true
        let personal = gateway.sent_to(Audience::One("m1".to_string())).await;
        assert_eq!(
            personal,
            vec![Notification::QuestionStatus { can_ask_new: true }]
        );
    }

    #[tokio::test]
    async fn test_late_respondent_receives_open_question() {
        // テスト項目: 質問の進行中に参加した回答者へ質問が再送される
        // given (前提条件): q1 が開いていて、未回答の既存回答者がいる
        let session = empty_session();
        let question = Question::new(
            QuestionId::new("q1".to_string()).unwrap(),
            "favorite color?".to_string(),
            vec!["red".to_string(), "blue".to_string()],
            30,
        );
        {
            let mut locked = session.lock().await;
            locked.roster.join(Participant::new(
                connection_id("c0"),
                display_name("Zoe"),
                Role::Respondent,
                Timestamp::new(0),
            ));
            locked.ledger.open(question.id.clone());
            let sequence_number = locked.sequence.next();
            locked.open = Some(OpenQuestion {
                question: question.clone(),
                sequence_number,
                remaining_secs: 30,
            });
        }
        let gateway = RecordingGateway::new();
        let usecase = ConnectParticipantUseCase::new(session, gateway.clone());

        // when (操作):
        usecase
            .execute(
                connection_id("c1"),
                display_name("Alice"),
                Role::Respondent,
                channel(),
            )
            .await;

        // then (期待する結果): 本人に question-started が届く
        let personal = gateway.sent_to(Audience::One("c1".to_string())).await;
        assert_eq!(
            personal,
            vec![Notification::QuestionStarted {
                question,
                sequence_number: 1
            }]
        );
    }
}
