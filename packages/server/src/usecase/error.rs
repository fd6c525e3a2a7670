//! UseCase 層のエラー型

use thiserror::Error;

/// 質問開始時のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartQuestionError {
    /// 未完了の質問が開いている
    #[error("A question is still in progress")]
    QuestionInProgress,
}
