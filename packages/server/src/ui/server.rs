//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::BroadcastGateway;
use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetSessionStateUseCase,
    RelayChatUseCase, RemoveParticipantUseCase, StartQuestionUseCase, SubmitAnswerUseCase,
};

use super::{
    handler::{debug_session_state, get_session_summary, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Q&A session server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     start_question_usecase,
///     submit_answer_usecase,
///     remove_participant_usecase,
///     relay_chat_usecase,
///     get_session_state_usecase,
///     gateway,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// StartQuestionUseCase（質問開始のユースケース）
    start_question_usecase: Arc<StartQuestionUseCase>,
    /// SubmitAnswerUseCase（回答提出のユースケース）
    submit_answer_usecase: Arc<SubmitAnswerUseCase>,
    /// RemoveParticipantUseCase（回答者削除のユースケース）
    remove_participant_usecase: Arc<RemoveParticipantUseCase>,
    /// RelayChatUseCase（チャット中継のユースケース）
    relay_chat_usecase: Arc<RelayChatUseCase>,
    /// GetSessionStateUseCase（セッション状態取得のユースケース）
    get_session_state_usecase: Arc<GetSessionStateUseCase>,
    /// BroadcastGateway（question-error の個別送信用）
    gateway: Arc<dyn BroadcastGateway>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        start_question_usecase: Arc<StartQuestionUseCase>,
        submit_answer_usecase: Arc<SubmitAnswerUseCase>,
        remove_participant_usecase: Arc<RemoveParticipantUseCase>,
        relay_chat_usecase: Arc<RelayChatUseCase>,
        get_session_state_usecase: Arc<GetSessionStateUseCase>,
        gateway: Arc<dyn BroadcastGateway>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            start_question_usecase,
            submit_answer_usecase,
            remove_participant_usecase,
            relay_chat_usecase,
            get_session_state_usecase,
            gateway,
        }
    }

    /// Run the Q&A session server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            start_question_usecase: self.start_question_usecase,
            submit_answer_usecase: self.submit_answer_usecase,
            remove_participant_usecase: self.remove_participant_usecase,
            relay_chat_usecase: self.relay_chat_usecase,
            get_session_state_usecase: self.get_session_state_usecase,
            gateway: self.gateway,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/session", get(get_session_summary))
            .route("/debug/session", get(debug_session_state))
            // Browser clients connect from another origin
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Q&A session server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
