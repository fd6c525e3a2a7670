//! UseCase: 質問クローズ処理
//!
//! クローズ手続きは「全員回答」と「カウントダウン満了」の両方のトリガーで
//! 共有され、質問ごとに正確に一度だけ実行される。冪等性は開いている質問を
//! `Option::take` で取り出すことで保証する。二重トリガーの後勝ちは
//! 開いている質問が見つからず no-op になる。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - クローズ手続き（集計、poll-results の配信、Idle への遷移）
//! - CountdownObserver としての tick / 満了処理
//!
//! ### なぜこのテストが必要か
//! - poll-results が質問ごとに一度だけ配信されることを保証
//! - 古い質問 ID の tick / 満了が無視されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：満了によるクローズ
//! - 異常系：二重トリガー、ID 不一致の満了通知

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    BroadcastGateway, CountdownObserver, Notification, QuestionId, Session, SessionHandle,
    aggregate,
};

/// 開いている質問をクローズして結果を配信する（共有クローズ手続き）
///
/// 呼び出し側がセッションの mutex を保持していること。開いている質問が
/// なければ no-op（二重トリガーのガード）。
pub(crate) async fn close_open_question(
    session: &mut Session,
    gateway: &dyn BroadcastGateway,
) -> Option<QuestionId> {
    // 冪等性ガード: 2 回目のトリガーはここで None になる
    let open = session.open.take()?;

    let snapshot = session.ledger.snapshot(&open.question.id);
    let results = aggregate(&open.question.options, &snapshot);

    gateway
        .notify_all(&Notification::PollResults {
            results,
            sequence_number: open.sequence_number,
            question_id: open.question.id.clone(),
            question_text: open.question.text.clone(),
        })
        .await;
    gateway
        .notify_moderators(&Notification::QuestionStatus { can_ask_new: true })
        .await;

    tracing::info!(
        "Question '{}' (#{}) closed with {} answers",
        open.question.id.as_str(),
        open.sequence_number,
        snapshot.len()
    );

    Some(open.question.id)
}

/// 質問クローズのユースケース
///
/// カウントダウンの満了トリガーを受け持つ。`CountdownObserver` として
/// 毎秒の tick で残り秒数を更新し time-update を配信する。
pub struct CloseQuestionUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
}

impl CloseQuestionUseCase {
    /// 新しい CloseQuestionUseCase を作成
    pub fn new(session: SessionHandle, gateway: Arc<dyn BroadcastGateway>) -> Self {
        Self { session, gateway }
    }

    /// 指定の質問をクローズする
    ///
    /// 開いている質問の ID と一致しない場合は no-op（すでにクローズ済み、
    /// あるいは別の質問が開始された後の古いトリガー）。
    pub async fn execute(&self, question_id: &QuestionId) {
        let mut session = self.session.lock().await;
        if session.open_question_id() != Some(question_id) {
            tracing::debug!(
                "Ignoring close trigger for non-open question '{}'",
                question_id.as_str()
            );
            return;
        }
        close_open_question(&mut session, self.gateway.as_ref()).await;
    }
}

#[async_trait]
impl CountdownObserver for CloseQuestionUseCase {
    async fn on_tick(&self, question_id: &QuestionId, remaining: u32) {
        let mut session = self.session.lock().await;
        let Some(open) = session.open.as_mut() else {
            return;
        };
        if &open.question.id != question_id {
            return;
        }
        open.remaining_secs = remaining;
        self.gateway
            .notify_all(&Notification::TimeUpdate { remaining })
            .await;
    }

    async fn on_expired(&self, question_id: &QuestionId) {
        self.execute(question_id).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OpenQuestion, OptionTally, Question};
    use crate::usecase::test_support::{Audience, RecordingGateway, empty_session};

    fn qid(value: &str) -> QuestionId {
        QuestionId::new(value.to_string()).unwrap()
    }

    async fn open_q1(session: &SessionHandle, answers: &[(&str, &str)]) {
        let mut locked = session.lock().await;
        let question_id = qid("q1");
        locked.ledger.open(question_id.clone());
        for (name, answer) in answers {
            locked.ledger.submit(&question_id, name, answer);
        }
        let sequence_number = locked.sequence.next();
        locked.open = Some(OpenQuestion {
            question: Question::new(
                question_id,
                "favorite color?".to_string(),
                vec!["red".to_string(), "blue".to_string()],
                5,
            ),
            sequence_number,
            remaining_secs: 5,
        });
    }

    #[tokio::test]
    async fn test_expiry_closes_and_publishes_results() {
        // テスト項目: 満了で poll-results が全員へ配信され Idle へ遷移する
        // given (前提条件): q1 が開いていて Alice が回答済み
        let session = empty_session();
        open_q1(&session, &[("Alice", "red")]).await;
        let gateway = RecordingGateway::new();
        let usecase = CloseQuestionUseCase::new(session.clone(), gateway.clone());

        // when (操作):
        usecase.on_expired(&qid("q1")).await;

        // then (期待する結果):
        let broadcasts = gateway.sent_to(Audience::All).await;
        assert_eq!(
            broadcasts,
            vec![Notification::PollResults {
                results: vec![
                    OptionTally {
                        option: "red".to_string(),
                        count: 1,
                        percentage: 100
                    },
                    OptionTally {
                        option: "blue".to_string(),
                        count: 0,
                        percentage: 0
                    },
                ],
                sequence_number: 1,
                question_id: qid("q1"),
                question_text: "favorite color?".to_string(),
            }]
        );
        let to_moderators = gateway.sent_to(Audience::Moderators).await;
        assert_eq!(
            to_moderators,
            vec![Notification::QuestionStatus { can_ask_new: true }]
        );
        assert!(session.lock().await.open.is_none());
    }

    #[tokio::test]
    async fn test_second_trigger_is_noop() {
        // テスト項目: 二重トリガーでは poll-results は一度しか配信されない
        // given (前提条件):
        let session = empty_session();
        open_q1(&session, &[]).await;
        let gateway = RecordingGateway::new();
        let usecase = CloseQuestionUseCase::new(session, gateway.clone());

        // when (操作): 同じ質問の満了が二度届く
        usecase.on_expired(&qid("q1")).await;
        usecase.on_expired(&qid("q1")).await;

        // then (期待する結果):
        let broadcasts = gateway.sent_to(Audience::All).await;
        assert_eq!(broadcasts.len(), 1);
    }

    #[tokio::test]
    async fn test_mismatched_question_id_is_ignored() {
        // テスト項目: 開いている質問と異なる ID の満了は無視される
        // given (前提条件): q1 が開いている
        let session = empty_session();
        open_q1(&session, &[]).await;
        let gateway = RecordingGateway::new();
        let usecase = CloseQuestionUseCase::new(session.clone(), gateway.clone());

        // when (操作): 古い質問 q0 の満了が届く
        usecase.on_expired(&qid("q0")).await;

        // then (期待する結果): q1 は開いたまま
        assert!(session.lock().await.open.is_some());
        assert!(gateway.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_tick_updates_remaining_and_broadcasts() {
        // テスト項目: tick で残り秒数が更新され time-update が配信される
        // given (前提条件):
        let session = empty_session();
        open_q1(&session, &[]).await;
        let gateway = RecordingGateway::new();
        let usecase = CloseQuestionUseCase::new(session.clone(), gateway.clone());

        // when (操作):
        usecase.on_tick(&qid("q1"), 4).await;

        // then (期待する結果):
        assert_eq!(
            session.lock().await.open.as_ref().unwrap().remaining_secs,
            4
        );
        let broadcasts = gateway.sent_to(Audience::All).await;
        assert_eq!(broadcasts, vec![Notification::TimeUpdate { remaining: 4 }]);
    }

    #[tokio::test]
    async fn test_tick_for_stale_question_is_ignored() {
        // テスト項目: ID 不一致の tick は状態を変えない
        // given (前提条件):
        let session = empty_session();
        open_q1(&session, &[]).await;
        let gateway = RecordingGateway::new();
        let usecase = CloseQuestionUseCase::new(session.clone(), gateway.clone());

        // when (操作):
        usecase.on_tick(&qid("q0"), 1).await;

        // then (期待する結果):
        assert_eq!(
            session.lock().await.open.as_ref().unwrap().remaining_secs,
            5
        );
        assert!(gateway.sent.lock().await.is_empty());
    }
}
