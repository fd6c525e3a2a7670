//! UseCase: 回答提出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitAnswerUseCase::execute() メソッド
//! - ID 不一致・重複の無視、全員回答での即時クローズ
//!
//! ### なぜこのテストが必要か
//! - 「回答者 1 人につき 1 回答」の不変条件を保証
//! - 最後の回答とタイマー満了の競合でクローズ手続きが二重に走らないこと
//!   （キャンセルを先に、クローズを後に）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答の受理、最後の回答での即時クローズ
//! - 異常系：閉じた質問・別の質問への回答、同じ回答者の再提出

use std::sync::Arc;

use crate::domain::{BroadcastGateway, CountdownScheduler, QuestionId, SessionHandle};

use super::close_question::close_open_question;

/// 回答提出の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 受理された
    Accepted,
    /// 受理され、全員回答によって質問がクローズされた
    AcceptedAndClosed,
    /// 無視された（ID 不一致・重複・開いている質問なし）
    Ignored,
}

/// 回答提出のユースケース
pub struct SubmitAnswerUseCase {
    /// 共有セッション状態へのハンドル
    session: SessionHandle,
    /// BroadcastGateway（通知のファンアウトの抽象化）
    gateway: Arc<dyn BroadcastGateway>,
    /// CountdownScheduler（全員回答時に同期的にキャンセルする）
    scheduler: Arc<dyn CountdownScheduler>,
}

impl SubmitAnswerUseCase {
    /// 新しい SubmitAnswerUseCase を作成
    pub fn new(
        session: SessionHandle,
        gateway: Arc<dyn BroadcastGateway>,
        scheduler: Arc<dyn CountdownScheduler>,
    ) -> Self {
        Self {
            session,
            gateway,
            scheduler,
        }
    }

    /// 回答提出を実行
    ///
    /// 開いている質問の ID と一致しない提出は黙って無視する（通知もエラーも
    /// なし）。受理後に回答数が現在の回答者数に達したら、タイマーを先に
    /// キャンセルしてからクローズ手続きを実行する。
    pub async fn execute(
        &self,
        question_id: QuestionId,
        respondent_name: &str,
        answer: &str,
    ) -> SubmitOutcome {
        let mut session = self.session.lock().await;

        let Some(open_id) = session.open_question_id().cloned() else {
            tracing::debug!("Ignoring answer: no open question");
            return SubmitOutcome::Ignored;
        };
        if open_id != question_id {
            tracing::debug!(
                "Ignoring answer for non-open question '{}'",
                question_id.as_str()
            );
            return SubmitOutcome::Ignored;
        }

        if !session.ledger.submit(&question_id, respondent_name, answer) {
            tracing::debug!(
                "Ignoring duplicate answer from '{}' for question '{}'",
                respondent_name,
                question_id.as_str()
            );
            return SubmitOutcome::Ignored;
        }

        let answered = session.ledger.size(&question_id);
        let respondents = session.roster.respondent_count();
        tracing::info!(
            "Answer from '{}' accepted for '{}' ({}/{})",
            respondent_name,
            question_id.as_str(),
            answered,
            respondents
        );

        if answered >= respondents {
            // タイマー満了との競合ガード: クローズの前に同期的にキャンセル。
            // 既に走り出した満了処理側は open が取り出された後に no-op になる
            self.scheduler.cancel().await;
            close_open_question(&mut session, self.gateway.as_ref()).await;
            return SubmitOutcome::AcceptedAndClosed;
        }

        SubmitOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ConnectionId, DisplayName, Notification, OpenQuestion, Participant, Question, Role,
        Timestamp,
    };
    use crate::usecase::test_support::{
        Audience, RecordingGateway, RecordingScheduler, empty_session,
    };

    fn qid(value: &str) -> QuestionId {
        QuestionId::new(value.to_string()).unwrap()
    }

    fn respondent(id: &str, name: &str) -> Participant {
        Participant::new(
            ConnectionId::new(id.to_string()).unwrap(),
            DisplayName::new(name.to_string()).unwrap(),
            Role::Respondent,
            Timestamp::new(1000),
        )
    }

    async fn open_q1(session: &SessionHandle, respondents: &[(&str, &str)]) {
        let mut locked = session.lock().await;
        for (id, name) in respondents {
            locked.roster.join(respondent(id, name));
        }
        let question_id = qid("q1");
        locked.ledger.open(question_id.clone());
        let sequence_number = locked.sequence.next();
        locked.open = Some(OpenQuestion {
            question: Question::new(
                question_id,
                "A or B?".to_string(),
                vec!["A".to_string(), "B".to_string()],
                5,
            ),
            sequence_number,
            remaining_secs: 5,
        });
    }

    #[tokio::test]
    async fn test_partial_submission_is_accepted_without_closing() {
        // テスト項目: 一部の回答だけでは質問はクローズされない
        // given (前提条件): 回答者 2 人
        let session = empty_session();
        open_q1(&session, &[("c1", "Alice"), ("c2", "Bob")]).await;
        let gateway = RecordingGateway::new();
        let scheduler = RecordingScheduler::new();
        let usecase = SubmitAnswerUseCase::new(session.clone(), gateway.clone(), scheduler.clone());

        // when (操作):
        let outcome = usecase.execute(qid("q1"), "Alice", "A").await;

        // then (期待する結果):
        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert!(session.lock().await.open.is_some());
        assert_eq!(*scheduler.cancel_count.lock().await, 0);
        assert!(gateway.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_last_answer_cancels_countdown_and_closes() {
        // テスト項目: 最後の回答で即時クローズ（キャンセルが先）
        // given (前提条件): 回答者 2 人、Alice は回答済み
        let session = empty_session();
        open_q1(&session, &[("c1", "Alice"), ("c2", "Bob")]).await;
        let gateway = RecordingGateway::new();
        let scheduler = RecordingScheduler::new();
        let usecase = SubmitAnswerUseCase::new(session.clone(), gateway.clone(), scheduler.clone());
        usecase.execute(qid("q1"), "Alice", "A").await;

        // when (操作):
        let outcome = usecase.execute(qid("q1"), "Bob", "B").await;

        // then (期待する結果): クローズされ、タイマーはキャンセル済み
        assert_eq!(outcome, SubmitOutcome::AcceptedAndClosed);
        assert!(session.lock().await.open.is_none());
        assert_eq!(*scheduler.cancel_count.lock().await, 1);
        let to_all = gateway.sent_to(Audience::All).await;
        assert_eq!(to_all.len(), 1);
        assert!(matches!(to_all[0], Notification::PollResults { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_submission_is_ignored() {
        // テスト項目: 同じ回答者の再提出は AnswerSet を変えない
        // given (前提条件):
        let session = empty_session();
        open_q1(&session, &[("c1", "Alice"), ("c2", "Bob")]).await;
        let gateway = RecordingGateway::new();
        let scheduler = RecordingScheduler::new();
        let usecase = SubmitAnswerUseCase::new(session.clone(), gateway, scheduler);
        usecase.execute(qid("q1"), "Alice", "A").await;

        // when (操作):
        let outcome = usecase.execute(qid("q1"), "Alice", "B").await;

        // then (期待する結果): 先勝ち
        assert_eq!(outcome, SubmitOutcome::Ignored);
        let locked = session.lock().await;
        assert_eq!(locked.ledger.snapshot(&qid("q1")).get("Alice").unwrap(), "A");
    }

    #[tokio::test]
    async fn test_mismatched_question_id_is_ignored() {
        // テスト項目: 開いている質問と異なる ID への回答は無視される
        // given (前提条件):
        let session = empty_session();
        open_q1(&session, &[("c1", "Alice")]).await;
        let gateway = RecordingGateway::new();
        let scheduler = RecordingScheduler::new();
        let usecase = SubmitAnswerUseCase::new(session.clone(), gateway, scheduler);

        // when (操作):
        let outcome = usecase.execute(qid("q0"), "Alice", "A").await;

        // then (期待する結果):
        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(session.lock().await.ledger.size(&qid("q1")), 0);
    }

    #[tokio::test]
    async fn test_submission_after_close_is_ignored() {
        // テスト項目: クローズ後の同じ ID への提出は無視される
        // given (前提条件): 回答者 1 人、全員回答でクローズ済み
        let session = empty_session();
        open_q1(&session, &[("c1", "Alice")]).await;
        let gateway = RecordingGateway::new();
        let scheduler = RecordingScheduler::new();
        let usecase = SubmitAnswerUseCase::new(session.clone(), gateway.clone(), scheduler);
        let first = usecase.execute(qid("q1"), "Alice", "A").await;
        assert_eq!(first, SubmitOutcome::AcceptedAndClosed);

        // when (操作): 遅れて届いた提出
        let outcome = usecase.execute(qid("q1"), "Bob", "B").await;

        // then (期待する結果): poll-results は一度だけのまま
        assert_eq!(outcome, SubmitOutcome::Ignored);
        let to_all = gateway.sent_to(Audience::All).await;
        assert_eq!(to_all.len(), 1);
    }
}
