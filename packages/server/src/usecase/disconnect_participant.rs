//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - ロスターからの削除と回答者リストの再配信
//!
//! ### なぜこのテストが必要か
//! - 切断後の participants-update が正確な現状を反映することを保証
//! - 切断が進行中の質問（AnswerSet）に影響しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答者の切断
//! - エッジケース：質問の進行中の切断（回答は残る）

use std::sync::Arc;

use crate::domain::{BroadcastGateway, ConnectionId, Notification, SessionHandle};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(session: SessionHandle, gateway: Arc<dyn BroadcastGateway>) -> Self {
        Self { session, gateway }
    }

    /// 参加者切断を実行
    ///
    /// ロスターから削除して回答者リストを再配信する。開いている質問には
    /// 一切触れない（提出済みの回答は数えられたまま残る）。
    pub async fn execute(&self, connection_id: ConnectionId) {
        self.gateway.unregister(&connection_id).await;

        let mut session = self.session.lock().await;
        session.roster.remove(&connection_id);
        let names = session.roster.respondent_names();
        self.gateway
            .notify_all(&Notification::ParticipantsUpdate { names })
            .await;

        tracing::info!("Participant '{}' disconnected", connection_id.as_str());
    }
}
