//! HTTP / WebSocket endpoint handlers.

mod http;
mod websocket;

pub use http::{debug_session_state, get_session_summary, health_check};
pub use websocket::websocket_handler;
