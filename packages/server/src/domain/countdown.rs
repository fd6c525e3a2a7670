//! Countdown trait 定義
//!
//! 開いている質問と 1:1 で結び付くカウントダウンのインターフェース。
//! 毎秒の tick と満了はシステム内で唯一の自律的な活動であり、それ以外の
//! すべての操作はインバウンドイベントへの反応として実行される。
//!
//! 具体的な実装（tokio のタイマー）は Infrastructure 層が提供する。

use async_trait::async_trait;

use super::value_object::QuestionId;

/// tick と満了を受け取るオブザーバー
///
/// 実装側（UseCase 層）はセッションの mutex を取得してから状態を更新する。
/// これによりインバウンドイベントと同じ直列化ドメインで処理される。
#[async_trait]
pub trait CountdownObserver: Send + Sync {
    /// 毎秒呼ばれる。`remaining` は減算後の残り秒数
    async fn on_tick(&self, question_id: &QuestionId, remaining: u32);

    /// 残り秒数が 0 に達したとき、一度だけ呼ばれる
    async fn on_expired(&self, question_id: &QuestionId);
}

/// カウントダウンのスケジューラ
///
/// 同時に動くカウントダウンは高々 1 つ。`start` は実行中のものを
/// 先にキャンセルしてから新しいカウントダウンを開始する。
#[async_trait]
pub trait CountdownScheduler: Send + Sync {
    /// カウントダウンを開始する
    async fn start(
        &self,
        question_id: QuestionId,
        seconds: u32,
        observer: std::sync::Arc<dyn CountdownObserver>,
    );

    /// 実行中のカウントダウンを止める（動いていなければ何もしない）
    async fn cancel(&self);
}
