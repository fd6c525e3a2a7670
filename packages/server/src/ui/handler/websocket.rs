//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, ConnectionIdFactory, DisplayName, Notification, Question, QuestionId, Role,
    },
    infrastructure::dto::websocket::ClientMessage,
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// "moderator" or "respondent"
    pub role: String,
    /// Required for respondents; moderators default to "moderator"
    pub display_name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert query parameters -> Domain Model
    let Some(role) = Role::parse(&query.role) else {
        tracing::warn!("Invalid role '{}'. Rejecting connection.", query.role);
        return Err(StatusCode::BAD_REQUEST);
    };

    let raw_name = match (role, query.display_name) {
        (Role::Respondent, Some(name)) => name,
        (Role::Respondent, None) => {
            tracing::warn!("Respondent connection without display_name. Rejecting.");
            return Err(StatusCode::BAD_REQUEST);
        }
        (Role::Moderator, Some(name)) => name,
        (Role::Moderator, None) => "moderator".to_string(),
    };
    let display_name = match DisplayName::new(raw_name) {
        Ok(name) => name,
        Err(e) => {
            tracing::warn!("Invalid display_name: {}. Rejecting connection.", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Identity is server-generated and stable for the connection's lifetime
    let connection_id = ConnectionIdFactory::generate();

    // Create a channel for this connection to receive notifications
    let (tx, rx) = mpsc::unbounded_channel();

    // Register with the gateway and the roster, broadcast the join
    state
        .connect_participant_usecase
        .execute(connection_id.clone(), display_name, role, tx)
        .await;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, role, rx)))
}

/// Spawns a task that receives notifications from the rx channel and
/// pushes them to the WebSocket sender.
///
/// This is the outbound flow: everything the state machine emits for
/// this connection arrives through `rx` and leaves through the socket.
/// The task ends when the channel closes (unregister or forced
/// disconnection), which closes the socket.
fn spawn_send_task(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            if sender
                .send(Message::Text(notification.into()))
                .await
                .is_err()
            {
                break;
            }
        }
    })
}

pub async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    role: Role,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let mut send_task = spawn_send_task(rx, sender);

    // Receive inbound events from this connection and dispatch them
    let state_for_recv = state.clone();
    let connection_id_for_recv = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(message) = receiver.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match message {
                Message::Text(text) => {
                    let client_message = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => message,
                        Err(e) => {
                            // Malformed payloads are ignored at the transport
                            // boundary; the core never sees them
                            tracing::warn!("Failed to parse inbound message: {}", e);
                            continue;
                        }
                    };
                    dispatch_message(
                        &state_for_recv,
                        &connection_id_for_recv,
                        role,
                        client_message,
                    )
                    .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_for_recv.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Connection closed: remove from roster and rebroadcast
    state
        .disconnect_participant_usecase
        .execute(connection_id)
        .await;
}

/// Route one inbound event to its usecase.
///
/// Moderator-only events from respondent connections are dropped with a
/// warning; they carry no reply.
async fn dispatch_message(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    role: Role,
    message: ClientMessage,
) {
    match message {
        ClientMessage::StartQuestion { question } => {
            if role != Role::Moderator {
                tracing::warn!(
                    "Ignoring start-question from non-moderator '{}'",
                    connection_id.as_str()
                );
                return;
            }
            let question = match Question::try_from(question) {
                Ok(question) => question,
                Err(e) => {
                    tracing::warn!("Ignoring start-question with invalid payload: {}", e);
                    return;
                }
            };
            if let Err(e) = state.start_question_usecase.execute(question).await {
                // Rejections go to the requesting moderator only
                let notification = Notification::QuestionError {
                    message: e.to_string(),
                };
                if let Err(push_error) = state
                    .gateway
                    .notify_one(connection_id, &notification)
                    .await
                {
                    tracing::warn!(
                        "Failed to send question-error to '{}': {}",
                        connection_id.as_str(),
                        push_error
                    );
                }
            }
        }
        ClientMessage::SubmitAnswer {
            question_id,
            respondent_name,
            answer,
        } => {
            let question_id = match QuestionId::new(question_id) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Ignoring submit-answer with invalid id: {}", e);
                    return;
                }
            };
            let outcome = state
                .submit_answer_usecase
                .execute(question_id, &respondent_name, &answer)
                .await;
            tracing::debug!("submit-answer outcome: {:?}", outcome);
        }
        ClientMessage::RemoveParticipant { display_name } => {
            if role != Role::Moderator {
                tracing::warn!(
                    "Ignoring remove-participant from non-moderator '{}'",
                    connection_id.as_str()
                );
                return;
            }
            state
                .remove_participant_usecase
                .execute(&display_name)
                .await;
        }
        ClientMessage::ChatMessage { payload } => {
            state.relay_chat_usecase.execute(payload).await;
        }
    }
}
