//! UseCase: チャット中継処理
//!
//! チャットはコアの管轄外。ペイロードを解釈せず、送信者を含む全員へ
//! そのまま中継するだけ。

use std::sync::Arc;

use crate::domain::{BroadcastGateway, Notification};

/// チャット中継のユースケース
pub struct RelayChatUseCase {
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
}

impl RelayChatUseCase {
    /// 新しい RelayChatUseCase を作成
    pub fn new(gateway: Arc<dyn BroadcastGateway>) -> Self {
        Self { gateway }
    }

    /// チャットペイロードを全員へ素通しで中継する
    pub async fn execute(&self, payload: serde_json::Value) {
        self.gateway
            .notify_all(&Notification::Chat { payload })
            .await;
    }
}
