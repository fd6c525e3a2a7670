//! Error types for the Q&A client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the connection (bad role or display name)
    #[error("Connection rejected by server: {0}")]
    Rejected(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The moderator removed this respondent from the session
    #[error("Removed from the session by the moderator")]
    Removed,
}
