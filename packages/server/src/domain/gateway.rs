//! Broadcast Gateway trait 定義
//!
//! ステートマシンの出力を接続中の参加者へファンアウトするための
//! インターフェース。グルーピング（全員・回答者・モデレーター・個別）が
//! どう実装されているかをコアは知らない。
//!
//! ## 依存性の逆転（DIP）
//!
//! - ドメイン層が必要とするインターフェースをドメイン層自身が定義
//! - Infrastructure 層（WebSocket 実装）がこの trait に依存
//! - ドメイン層は Infrastructure 層に依存しない

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::notification::Notification;
use super::value_object::{ConnectionId, Role};

/// 接続ごとの送信チャンネル
pub type GatewayChannel = mpsc::UnboundedSender<String>;

/// 通知送信時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// 接続が見つからない
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    /// 送信に失敗した
    #[error("Failed to push notification: {0}")]
    PushFailed(String),
}

/// Broadcast Gateway trait
///
/// ブロードキャスト系のメソッド（`notify_all` など）は一部の送信失敗を
/// 許容する（警告ログのみ）。個別送信の `notify_one` だけが失敗を返す。
#[async_trait]
pub trait BroadcastGateway: Send + Sync {
    /// 接続を役割付きで登録する
    async fn register(&self, connection_id: ConnectionId, role: Role, channel: GatewayChannel);

    /// 接続の登録を解除する
    async fn unregister(&self, connection_id: &ConnectionId);

    /// 全員へ通知する
    async fn notify_all(&self, notification: &Notification);

    /// 回答者全員へ通知する
    async fn notify_respondents(&self, notification: &Notification);

    /// モデレーター全員へ通知する
    async fn notify_moderators(&self, notification: &Notification);

    /// 特定の接続へ通知する
    async fn notify_one(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), GatewayError>;

    /// 接続を強制切断する（削除された回答者向け）
    async fn force_disconnect(&self, connection_id: &ConnectionId);
}
