//! CLI client library for Mondou live Q&A sessions.
//!
//! Connects to the session server over WebSocket, renders server
//! notifications, and turns prompt input into session commands.

pub mod command;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;
