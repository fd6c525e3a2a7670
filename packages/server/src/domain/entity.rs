//! エンティティ
//!
//! セッションに参加する Participant と、モデレーターが開始する Question。

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, DisplayName, QuestionId, Role, Timestamp};

/// セッション参加者
///
/// 接続時に作成され、切断または明示的な削除で破棄される。
/// 接続 ID ごとに高々 1 レコード（Roster が保証する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// 接続 ID（接続ごとに安定）
    pub connection_id: ConnectionId,
    /// 表示名（一意性は強制しない）
    pub display_name: DisplayName,
    /// 役割（moderator / respondent）
    pub role: Role,
    /// 参加時刻（JST, ミリ秒）
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(
        connection_id: ConnectionId,
        display_name: DisplayName,
        role: Role,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            display_name,
            role,
            joined_at,
        }
    }
}

/// 質問
///
/// モデレーターが開始した時点で作成され、以後不変。
/// 同時に「開いている」質問は高々 1 つ（Session が保証する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 質問 ID（呼び出し側が一意性を保証する）
    pub id: QuestionId,
    /// 質問文
    pub text: String,
    /// 選択肢（順序が結果の表示順になる）
    pub options: Vec<String>,
    /// 制限時間（秒）
    pub time_limit_secs: u32,
}

impl Question {
    pub fn new(id: QuestionId, text: String, options: Vec<String>, time_limit_secs: u32) -> Self {
        Self {
            id,
            text,
            options,
            time_limit_secs,
        }
    }
}
