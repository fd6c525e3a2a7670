//! Live Q&A session server.
//!
//! One moderator starts questions, respondents answer, results are
//! published exactly once per question.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mondou-server
//! cargo run --bin mondou-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use mondou_server::{
    domain::Session,
    infrastructure::{countdown::TokioCountdownScheduler, gateway::WebSocketBroadcastGateway},
    ui::Server,
    usecase::{
        CloseQuestionUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
        GetSessionStateUseCase, RelayChatUseCase, RemoveParticipantUseCase, StartQuestionUseCase,
        SubmitAnswerUseCase,
    },
};
use mondou_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Live Q&A session server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Session state (single handle, single mutex)
    // 2. BroadcastGateway (WebSocket implementation)
    // 3. CountdownScheduler (tokio timer)
    // 4. UseCases (close first: it observes the countdown)
    // 5. Server

    // 1. Create the shared session state
    let session = Arc::new(Mutex::new(Session::new()));
    tracing::info!("Session initialized");

    // 2. Create the BroadcastGateway (WebSocket implementation)
    let gateway = Arc::new(WebSocketBroadcastGateway::new());

    // 3. Create the CountdownScheduler
    let scheduler = Arc::new(TokioCountdownScheduler::new());

    // 4. Create UseCases
    let close_question_usecase = Arc::new(CloseQuestionUseCase::new(
        session.clone(),
        gateway.clone(),
    ));
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        session.clone(),
        gateway.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        session.clone(),
        gateway.clone(),
    ));
    let start_question_usecase = Arc::new(StartQuestionUseCase::new(
        session.clone(),
        gateway.clone(),
        scheduler.clone(),
        close_question_usecase.clone(),
    ));
    let submit_answer_usecase = Arc::new(SubmitAnswerUseCase::new(
        session.clone(),
        gateway.clone(),
        scheduler.clone(),
    ));
    let remove_participant_usecase = Arc::new(RemoveParticipantUseCase::new(
        session.clone(),
        gateway.clone(),
    ));
    let relay_chat_usecase = Arc::new(RelayChatUseCase::new(gateway.clone()));
    let get_session_state_usecase = Arc::new(GetSessionStateUseCase::new(session.clone()));

    // 5. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        start_question_usecase,
        submit_answer_usecase,
        remove_participant_usecase,
        relay_chat_usecase,
        get_session_state_usecase,
        gateway,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
