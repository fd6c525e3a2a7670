//! WebSocket を使った BroadcastGateway 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` と役割の管理
//! - 宛先グループ（全員・回答者・モデレーター・個別）への通知送信
//! - 強制切断（sender を破棄してチャンネルを閉じる）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、通知送信に使用します。
//!
//! これにより、「WebSocket の生成」と「通知の送信」が分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、通知送信
//!
//! 強制切断は接続のエントリを削除するだけでよい。sender が破棄されると
//! 受信側タスクはキューに残った通知を流し切ってから終了し、UI 層が
//! ソケットを閉じる。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastGateway, ConnectionId, GatewayChannel, GatewayError, Notification, Role,
};
use crate::infrastructure::dto::conversion::notification_to_json;

/// 接続ごとの登録情報
struct ConnectionEntry {
    role: Role,
    channel: GatewayChannel,
}

/// WebSocket を使った BroadcastGateway 実装
///
/// ## フィールド
///
/// - `connections`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketBroadcastGateway {
    /// Key: connection_id (String)
    /// Value: ConnectionEntry（役割と sender）
    connections: Mutex<HashMap<String, ConnectionEntry>>,
}

impl WebSocketBroadcastGateway {
    /// 新しい WebSocketBroadcastGateway を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// 述語に一致する接続へ送信する（ブロードキャストでは一部の送信失敗を許容）
    async fn send_where<F>(&self, notification: &Notification, predicate: F)
    where
        F: Fn(&ConnectionEntry) -> bool,
    {
        let json = notification_to_json(notification);
        let connections = self.connections.lock().await;
        for (connection_id, entry) in connections.iter() {
            if !predicate(entry) {
                continue;
            }
            if let Err(e) = entry.channel.send(json.clone()) {
                tracing::warn!(
                    "Failed to push notification to connection '{}': {}",
                    connection_id,
                    e
                );
            }
        }
    }
}

impl Default for WebSocketBroadcastGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BroadcastGateway for WebSocketBroadcastGateway {
    async fn register(&self, connection_id: ConnectionId, role: Role, channel: GatewayChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            connection_id.as_str().to_string(),
            ConnectionEntry { role, channel },
        );
        tracing::debug!(
            "Connection '{}' registered to gateway as {}",
            connection_id.as_str(),
            role.as_str()
        );
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id.as_str());
        tracing::debug!(
            "Connection '{}' unregistered from gateway",
            connection_id.as_str()
        );
    }

    async fn notify_all(&self, notification: &Notification) {
        self.send_where(notification, |_| true).await;
    }

    async fn notify_respondents(&self, notification: &Notification) {
        self.send_where(notification, |entry| entry.role == Role::Respondent)
            .await;
    }

    async fn notify_moderators(&self, notification: &Notification) {
        self.send_where(notification, |entry| entry.role == Role::Moderator)
            .await;
    }

    async fn notify_one(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), GatewayError> {
        let connections = self.connections.lock().await;
        let Some(entry) = connections.get(connection_id.as_str()) else {
            return Err(GatewayError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ));
        };
        entry
            .channel
            .send(notification_to_json(notification))
            .map_err(|e| GatewayError::PushFailed(e.to_string()))?;
        tracing::debug!(
            "Pushed notification to connection '{}'",
            connection_id.as_str()
        );
        Ok(())
    }

    async fn force_disconnect(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(connection_id.as_str()).is_some() {
            tracing::info!(
                "Connection '{}' force-disconnected",
                connection_id.as_str()
            );
        }
    }
}
