//! UseCase: セッション状態取得処理
//!
//! HTTP サーフェス（デバッグ・サマリ）向けの読み取り専用スナップショット。

use crate::domain::{Session, SessionHandle};

/// セッション状態取得のユースケース
pub struct GetSessionStateUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
}

impl GetSessionStateUseCase {
    /// 新しい GetSessionStateUseCase を作成
    pub fn new(session: SessionHandle) -> Self {
        Self { session }
    }

    /// 現在のセッション状態のスナップショットを返す
    pub async fn execute(&self) -> Session {
        self.session.lock().await.clone()
    }
}
