//! UseCase: 回答者削除処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RemoveParticipantUseCase::execute() メソッド
//! - 表示名による削除、本人への通知と強制切断、リストの再配信
//!
//! ### なぜこのテストが必要か
//! - 削除された本人に participant-removed が届いてから切断されることを保証
//! - 存在しない表示名の削除が no-op であることを確認
//! - 削除しても提出済みの回答が数えられたまま残ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答者の削除
//! - 異常系：存在しない表示名
//! - エッジケース：回答済みの回答者の削除

use std::sync::Arc;

use crate::domain::{BroadcastGateway, ConnectionId, Notification, SessionHandle};

/// 回答者削除のユースケース
pub struct RemoveParticipantUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
}

impl RemoveParticipantUseCase {
    /// 新しい RemoveParticipantUseCase を作成
    pub fn new(session: SessionHandle, gateway: Arc<dyn BroadcastGateway>) -> Self {
        Self { session, gateway }
    }

    /// 回答者削除を実行
    ///
    /// 表示名が一致する最初の回答者を削除し、その接続 ID を返す。
    /// 見つからなければ no-op で `None`。マシン状態に関わらずリストを
    /// 再配信する。進行中の質問の AnswerSet には触れない。
    pub async fn execute(&self, display_name: &str) -> Option<ConnectionId> {
        let mut session = self.session.lock().await;

        let Some(connection_id) = session.roster.remove_by_display_name(display_name) else {
            tracing::debug!("No respondent named '{}' to remove", display_name);
            return None;
        };

        // 本人へ通知してから強制切断（キューに残った通知は切断前に流れる）
        if let Err(e) = self
            .gateway
            .notify_one(&connection_id, &Notification::ParticipantRemoved)
            .await
        {
            tracing::warn!(
                "Failed to notify removed respondent '{}': {}",
                connection_id.as_str(),
                e
            );
        }
        self.gateway.force_disconnect(&connection_id).await;

        let names = session.roster.respondent_names();
        self.gateway
            .notify_all(&Notification::ParticipantsUpdate { names })
            .await;

        tracing::info!(
            "Respondent '{}' removed by moderator",
            display_name
        );

        Some(connection_id)
    }
}
