//! Result aggregation.
//!
//! Pure function from (candidate options, collected answers) to
//! per-option counts and percentages, easy to test in isolation.

use serde::{Deserialize, Serialize};

use super::answer_ledger::AnswerSet;

/// Tally for a single option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTally {
    pub option: String,
    pub count: usize,
    pub percentage: u32,
}

/// Aggregate answers into per-option counts and percentages.
///
/// Counts are initialized to 0 for every option, in `options` order, so
/// the result order matches the original option order rather than
/// arrival order. Answers matching no known option are dropped from the
/// tally but still count toward the percentage denominator
/// (`answers.len()`), so stray answers depress all percentages rather
/// than being excluded. Percentages are rounded independently and may
/// not sum to exactly 100.
pub fn aggregate(options: &[String], answers: &AnswerSet) -> Vec<OptionTally> {
    let total_answers = answers.len();

    let mut counts: Vec<usize> = vec![0; options.len()];
    for answer in answers.values() {
        if let Some(index) = options.iter().position(|option| option == answer) {
            counts[index] += 1;
        }
    }

    options
        .iter()
        .zip(counts)
        .map(|(option, count)| {
            let percentage = if total_answers > 0 {
                ((count as f64 / total_answers as f64) * 100.0).round() as u32
            } else {
                0
            };
            OptionTally {
                option: option.clone(),
                count,
                percentage,
            }
        })
        .collect()
}
