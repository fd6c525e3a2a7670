//! UseCase: 質問開始処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - StartQuestionUseCase::execute() メソッド
//! - 完了述語によるゲート、シーケンス番号の割り当て、各種ブロードキャスト、
//!   カウントダウンの開始
//!
//! ### なぜこのテストが必要か
//! - 「開いている質問は高々 1 つ」という中心的な不変条件を守る
//! - 拒否時に既存の質問の状態が一切変わらないことを保証
//! - 完了済み（全員回答 / 残り時間ゼロ）の質問の上からの再開始を許可する
//!
//! ### どのような状況を想定しているか
//! - 正常系：Idle からの開始、完了済み質問の上からの開始
//! - 異常系：未完了の質問が開いている最中の開始要求

use std::sync::Arc;

use crate::domain::{
    BroadcastGateway, CountdownObserver, CountdownScheduler, Notification, OpenQuestion, Question,
    SessionHandle,
};

use super::error::StartQuestionError;

/// 質問開始のユースケース
pub struct StartQuestionUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
    /// CountdownScheduler（タイマーの抽象化）
    scheduler: Arc<dyn CountdownScheduler>,
    /// tick / 満了を受け取るオブザーバー（CloseQuestionUseCase）
    observer: Arc<dyn CountdownObserver>,
}

impl StartQuestionUseCase {
    /// 新しい StartQuestionUseCase を作成
    pub fn new(
        session: SessionHandle,
        gateway: Arc<dyn BroadcastGateway>,
        scheduler: Arc<dyn CountdownScheduler>,
        observer: Arc<dyn CountdownObserver>,
    ) -> Self {
        Self {
            session,
            gateway,
            scheduler,
            observer,
        }
    }

    /// 質問開始を実行
    ///
    /// # Returns
    ///
    /// * `Ok(u32)` - 割り当てられたシーケンス番号
    /// * `Err(StartQuestionError)` - 未完了の質問が開いている
    ///
    /// 拒否時の question-error 通知は UI 層（WebSocket ハンドラ）が
    /// 要求元の接続に対してのみ送る。
    pub async fn execute(&self, question: Question) -> Result<u32, StartQuestionError> {
        let mut session = self.session.lock().await;

        // 完了述語によるゲート。マシン状態（Open/Idle）だけでは判定しない
        if !session.can_start_question() {
            return Err(StartQuestionError::QuestionInProgress);
        }

        // 完了済みなのにクローズ処理が走っていない質問はここで破棄される
        // （結果は配信されない。クローズされなかった質問に poll-results はない）
        if let Some(discarded) = session.open.take() {
            tracing::info!(
                "Discarding complete but unclosed question '{}' (#{})",
                discarded.question.id.as_str(),
                discarded.sequence_number
            );
        }

        let sequence_number = session.sequence.next();
        session.ledger.open(question.id.clone());
        session.open = Some(OpenQuestion {
            question: question.clone(),
            sequence_number,
            remaining_secs: question.time_limit_secs,
        });

        // 回答者へ質問、全員へ残り時間、モデレーターへ開始不可を通知
        self.gateway
            .notify_respondents(&Notification::QuestionStarted {
                question: question.clone(),
                sequence_number,
            })
            .await;
        self.gateway
            .notify_all(&Notification::TimeUpdate {
                remaining: question.time_limit_secs,
            })
            .await;
        self.gateway
            .notify_moderators(&Notification::QuestionStatus { can_ask_new: false })
            .await;

        // カウントダウンを開始（実行中のものは start がキャンセルする）
        self.scheduler
            .start(
                question.id.clone(),
                question.time_limit_secs,
                self.observer.clone(),
            )
            .await;

        tracing::info!(
            "Question '{}' started as #{} ({} options, {}s)",
            question.id.as_str(),
            sequence_number,
            question.options.len(),
            question.time_limit_secs
        );

        Ok(sequence_number)
    }
}
