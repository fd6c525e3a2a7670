//! tokio タイマーを使った CountdownScheduler 実装
//!
//! ## 責務
//!
//! - 1 秒周期の tick タスクの生成と破棄
//! - 「同時に動くカウントダウンは高々 1 つ」の保証
//!
//! ## 設計ノート
//!
//! `start` は前のタスクを abort してから新しいタスクを spawn する。
//! 満了は tick ループの終端で一度だけ通知される。満了処理そのものは
//! observer（UseCase 層）がセッションの mutex の下で行うため、全員回答
//! によるクローズと満了によるクローズが同時に走ることはない。
//!
//! 満了パスからは `cancel` を呼ばないこと。tick タスク自身の abort に
//! なり、満了通知の途中で殺される。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{CountdownObserver, CountdownScheduler, QuestionId};

/// tokio タスクによるカウントダウン
pub struct TokioCountdownScheduler {
    /// 実行中の tick タスク（高々 1 つ）
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TokioCountdownScheduler {
    /// 新しい TokioCountdownScheduler を作成
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }
}

impl Default for TokioCountdownScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CountdownScheduler for TokioCountdownScheduler {
    async fn start(
        &self,
        question_id: QuestionId,
        seconds: u32,
        observer: Arc<dyn CountdownObserver>,
    ) {
        let mut handle = self.handle.lock().await;

        // 実行中のカウントダウンを先にキャンセルする
        if let Some(previous) = handle.take() {
            previous.abort();
            tracing::debug!("Previous countdown aborted before start");
        }

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // interval の初回 tick は即時に完了する
            interval.tick().await;

            let mut remaining = seconds;
            while remaining > 0 {
                interval.tick().await;
                remaining -= 1;
                observer.on_tick(&question_id, remaining).await;
            }

            observer.on_expired(&question_id).await;
        });

        *handle = Some(task);
        tracing::debug!("Countdown started: {} seconds", seconds);
    }

    async fn cancel(&self) {
        let mut handle = self.handle.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
            tracing::debug!("Countdown cancelled");
        }
    }
}
