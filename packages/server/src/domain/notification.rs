//! アウトバウンド通知
//!
//! ステートマシンが Broadcast Gateway へ渡す通知の型付き表現。
//! ワイヤフォーマット（JSON の形）への変換は Infrastructure 層の
//! DTO が担当し、ドメイン層は通知の意味だけを持つ。

use super::entity::Question;
use super::results::OptionTally;
use super::value_object::QuestionId;

/// コアから各参加者へ送られる通知
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// 現在の回答者名リスト（ロスター変更のたびに全員へ）
    ParticipantsUpdate { names: Vec<String> },
    /// 新しい質問を開始できるか（モデレーターへ）
    QuestionStatus { can_ask_new: bool },
    /// 質問の開始（回答者へ。遅れて参加した回答者へも再送される）
    QuestionStarted {
        question: Question,
        sequence_number: u32,
    },
    /// 残り時間（開始時と毎秒の tick で全員へ）
    TimeUpdate { remaining: u32 },
    /// 集計結果（質問のクローズごとに一度だけ全員へ）
    PollResults {
        results: Vec<OptionTally>,
        sequence_number: u32,
        question_id: QuestionId,
        question_text: String,
    },
    /// 不正な質問開始の通知（要求したモデレーターのみへ）
    QuestionError { message: String },
    /// 削除された回答者本人への通知（この後、強制切断される）
    ParticipantRemoved,
    /// チャットの素通し中継（コアは内容を解釈しない）
    Chat { payload: serde_json::Value },
}
