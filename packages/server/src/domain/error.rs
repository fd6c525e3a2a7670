//! ドメイン層のエラー型

use thiserror::Error;

/// 値オブジェクト生成時の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 空文字列は許可されない
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// 文字数上限を超えた
    #[error("{field} must be at most {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}
