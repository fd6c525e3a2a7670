//! Prompt-input command parsing.
//!
//! Pure functions that turn a line of user input into a session command,
//! kept free of I/O so they are easy to test.

use thiserror::Error;

/// A parsed prompt command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain line: relay as chat
    Chat(String),
    /// `/answer <option>`: answer the currently open question
    Answer(String),
    /// `/ask <text> | <opt;opt;...> | <seconds>`: start a question
    Ask {
        text: String,
        options: Vec<String>,
        time_limit: u32,
    },
    /// `/remove <name>`: remove a respondent
    Remove(String),
    /// `/quit`: leave the session
    Quit,
}

/// Command parse errors, rendered as usage hints at the prompt
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Usage: /answer <option>")]
    AnswerUsage,

    #[error("Usage: /ask <text> | <option;option;...> | <seconds>")]
    AskUsage,

    #[error("Usage: /remove <name>")]
    RemoveUsage,

    #[error("Unknown command '{0}'. Commands: /answer /ask /remove /quit")]
    Unknown(String),
}

/// Parse one line of prompt input.
///
/// Lines not starting with `/` are chat. Empty lines parse to an empty
/// chat message and should be skipped by the caller.
pub fn parse_command(line: &str) -> Result<Command, CommandParseError> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(Command::Chat(line.to_string()));
    }

    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword {
        "/quit" => Ok(Command::Quit),
        "/answer" => {
            if rest.is_empty() {
                return Err(CommandParseError::AnswerUsage);
            }
            Ok(Command::Answer(rest.to_string()))
        }
        "/remove" => {
            if rest.is_empty() {
                return Err(CommandParseError::RemoveUsage);
            }
            Ok(Command::Remove(rest.to_string()))
        }
        "/ask" => parse_ask(rest),
        other => Err(CommandParseError::Unknown(other.to_string())),
    }
}

/// Parse the `/ask` argument: `<text> | <opt;opt;...> | <seconds>`
fn parse_ask(rest: &str) -> Result<Command, CommandParseError> {
    let segments: Vec<&str> = rest.split('|').map(str::trim).collect();
    let [text, options, seconds] = segments.as_slice() else {
        return Err(CommandParseError::AskUsage);
    };

    if text.is_empty() {
        return Err(CommandParseError::AskUsage);
    }

    let options: Vec<String> = options
        .split(';')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect();
    if options.is_empty() {
        return Err(CommandParseError::AskUsage);
    }

    let time_limit: u32 = seconds.parse().map_err(|_| CommandParseError::AskUsage)?;

    Ok(Command::Ask {
        text: text.to_string(),
        options,
        time_limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_chat() {
        // テスト項目: `/` で始まらない行はチャットになる
        // given (前提条件):
        let line = "hello everyone";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Chat("hello everyone".to_string())));
    }

    #[test]
    fn test_answer_command() {
        // テスト項目: /answer が選択肢を取り出す
        // given (前提条件):
        let line = "/answer red ";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Answer("red".to_string())));
    }

    #[test]
    fn test_answer_without_option_is_usage_error() {
        // テスト項目: 選択肢のない /answer は使い方エラー
        // given (前提条件):
        let line = "/answer";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandParseError::AnswerUsage));
    }

    #[test]
    fn test_ask_command_with_three_segments() {
        // テスト項目: /ask がテキスト・選択肢・秒数に分解される
        // given (前提条件):
        let line = "/ask favorite color? | red; blue ;green | 30";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Command::Ask {
                text: "favorite color?".to_string(),
                options: vec![
                    "red".to_string(),
                    "blue".to_string(),
                    "green".to_string()
                ],
                time_limit: 30,
            })
        );
    }

    #[test]
    fn test_ask_with_bad_seconds_is_usage_error() {
        // テスト項目: 秒数が数値でない /ask は使い方エラー
        // given (前提条件):
        let line = "/ask q? | a;b | soon";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandParseError::AskUsage));
    }

    #[test]
    fn test_ask_with_missing_segments_is_usage_error() {
        // テスト項目: セグメントが足りない /ask は使い方エラー
        // given (前提条件):
        let line = "/ask just a question";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandParseError::AskUsage));
    }

    #[test]
    fn test_quit_and_remove_and_unknown() {
        // テスト項目: /quit, /remove, 未知コマンドの解釈
        // given (前提条件):

        // when (操作):
        // then (期待する結果):
        assert_eq!(parse_command("/quit"), Ok(Command::Quit));
        assert_eq!(
            parse_command("/remove Alice"),
            Ok(Command::Remove("Alice".to_string()))
        );
        assert_eq!(
            parse_command("/ban Alice"),
            Err(CommandParseError::Unknown("/ban".to_string()))
        );
    }
}
