//! Live Q&A session server library.
//!
//! Coordinates a single question-and-answer session between one moderator
//! and many respondents over WebSocket: one open question at a time, one
//! answer per respondent, aggregated results published exactly once per
//! question.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
