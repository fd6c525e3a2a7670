//! Prompt display helpers.

use std::io::Write;

/// Re-print the input prompt after an asynchronous message interrupted it.
pub fn redisplay_prompt(name: &str) {
    print!("{} > ", name);
    let _ = std::io::stdout().flush();
}
