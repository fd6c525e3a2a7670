//! 値オブジェクト
//!
//! 接続 ID、表示名、質問 ID などのプリミティブ型のラッパー。
//! 生成時に検証を行い、不正な値がドメイン層に入らないようにする。

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// 接続 ID（接続ごとに安定した不透明な識別子）
///
/// WebSocket 接続の受付時にサーバー側で生成される。表示名とは独立で、
/// 同じ表示名の参加者が複数いても接続 ID は衝突しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空文字列は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "connection_id",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ConnectionId のファクトリ
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// UUID v4 で新しい接続 ID を生成
    pub fn generate() -> ConnectionId {
        ConnectionId(uuid::Uuid::new_v4().to_string())
    }
}

/// 参加者の表示名
///
/// 一意性は強制しない。同じ表示名の回答者が複数存在し得る
/// （その場合 AnswerSet 上で衝突する。既知の仕様）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayName(String);

/// 表示名の最大文字数
const DISPLAY_NAME_MAX_CHARS: usize = 64;

impl DisplayName {
    /// 新しい DisplayName を作成（空文字列・上限超過は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: "display_name",
            });
        }
        let chars = trimmed.chars().count();
        if chars > DISPLAY_NAME_MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: "display_name",
                max: DISPLAY_NAME_MAX_CHARS,
                actual: chars,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 質問 ID
///
/// モデレーター（クライアント側）が生成する。一意性の保証は呼び出し側の
/// 責務（UUID あるいは単調増加 ID を想定）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(String);

impl QuestionId {
    /// 新しい QuestionId を作成（空文字列は拒否）
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "question_id",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 参加者の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 司会者。質問の開始と回答者の削除ができる
    Moderator,
    /// 回答者。開いている質問に一度だけ回答できる
    Respondent,
}

impl Role {
    /// クエリパラメータの文字列から Role を解釈
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "moderator" => Some(Role::Moderator),
            "respondent" => Some(Role::Respondent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Moderator => "moderator",
            Role::Respondent => "respondent",
        }
    }
}

/// Unix タイムスタンプ（JST, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_rejects_empty() {
        // テスト項目: 空文字列の ConnectionId は拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = ConnectionId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValidationError::Empty {
                field: "connection_id"
            })
        );
    }

    #[test]
    fn test_connection_id_factory_generates_unique_ids() {
        // テスト項目: ファクトリが一意な接続 ID を生成する
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionIdFactory::generate();
        let id2 = ConnectionIdFactory::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_display_name_trims_whitespace() {
        // テスト項目: 表示名の前後の空白が除去される
        // given (前提条件):
        let value = "  Alice  ".to_string();

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_display_name_rejects_too_long() {
        // テスト項目: 上限を超える表示名は拒否される
        // given (前提条件):
        let value = "x".repeat(65);

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert!(matches!(result, Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn test_role_parse() {
        // テスト項目: 役割文字列が正しく解釈される
        // given (前提条件):

        // when (操作):
        // then (期待する結果):
        assert_eq!(Role::parse("moderator"), Some(Role::Moderator));
        assert_eq!(Role::parse("respondent"), Some(Role::Respondent));
        assert_eq!(Role::parse("admin"), None);
    }
}
