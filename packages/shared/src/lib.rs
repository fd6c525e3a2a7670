//! Shared library for the Mondou Q&A application.
//!
//! Utilities used by both the server and the client binaries:
//! logging setup and time handling.

pub mod logger;
pub mod time;
