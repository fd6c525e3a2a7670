//! Message formatting utilities for client display.

use mondou_server::infrastructure::dto::websocket::{OptionTallyDto, QuestionDto};

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the current respondent list
    pub fn format_participants(names: &[String], own_name: &str) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Respondents:\n");

        if names.is_empty() {
            output.push_str("(No respondents)\n");
        } else {
            for name in names {
                let me_suffix = if name == own_name { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", name, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a newly started question with its options
    pub fn format_question(question: &QuestionDto, sequence_number: u32) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n--- Question #{} ({}s) ---\n{}\n",
            sequence_number, question.time_limit, question.text
        ));
        for option in &question.options {
            output.push_str(&format!("  - {}\n", option));
        }
        output.push_str("Answer with: /answer <option>\n");
        output
    }

    /// Format a countdown tick
    pub fn format_time_update(remaining: u32) -> String {
        format!("\n[{}s remaining]\n", remaining)
    }

    /// Format aggregated poll results
    pub fn format_results(
        results: &[OptionTallyDto],
        sequence_number: u32,
        question_text: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n--- Results for question #{}: {} ---\n",
            sequence_number, question_text
        ));
        for tally in results {
            output.push_str(&format!(
                "{}: {} ({}%)\n",
                tally.option, tally.count, tally.percentage
            ));
        }
        output
    }

    /// Format a question-error notification
    pub fn format_question_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format the removal notification
    pub fn format_removed() -> String {
        "\nYou have been removed from the session by the moderator.\n".to_string()
    }

    /// Format a relayed chat payload
    pub fn format_chat(payload: &serde_json::Value) -> String {
        let from = payload["from"].as_str().unwrap_or("?");
        let text = payload["text"].as_str().unwrap_or("");
        format!("\n{}: {}\n", from, text)
    }

    /// Format an unrecognized raw message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_question_lists_options() {
        // テスト項目: 質問の整形に選択肢と制限時間が含まれる
        // given (前提条件):
        let question = QuestionDto {
            id: "q1".to_string(),
            text: "A or B?".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            time_limit: 30,
        };

        // when (操作):
        let output = MessageFormatter::format_question(&question, 2);

        // then (期待する結果):
        assert!(output.contains("Question #2"));
        assert!(output.contains("A or B?"));
        assert!(output.contains("  - A"));
        assert!(output.contains("(30s)"));
    }

    #[test]
    fn test_format_results_shows_counts_and_percentages() {
        // テスト項目: 結果の整形に件数とパーセンテージが含まれる
        // given (前提条件):
        let results = vec![
            OptionTallyDto {
                option: "A".to_string(),
                count: 1,
                percentage: 50,
            },
            OptionTallyDto {
                option: "B".to_string(),
                count: 1,
                percentage: 50,
            },
        ];

        // when (操作):
        let output = MessageFormatter::format_results(&results, 1, "A or B?");

        // then (期待する結果):
        assert!(output.contains("A: 1 (50%)"));
        assert!(output.contains("B: 1 (50%)"));
    }

    #[test]
    fn test_format_participants_marks_self() {
        // テスト項目: 自分の名前に (me) が付く
        // given (前提条件):
        let names = vec!["Alice".to_string(), "Bob".to_string()];

        // when (操作):
        let output = MessageFormatter::format_participants(&names, "Bob");

        // then (期待する結果):
        assert!(output.contains("Alice\n"));
        assert!(output.contains("Bob (me)\n"));
    }
}
