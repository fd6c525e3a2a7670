//! CLI client for Mondou live Q&A sessions.
//!
//! Join as a respondent to answer questions or as the moderator to ask
//! them.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin mondou-client -- --name Alice
//! cargo run --bin mondou-client -- --role moderator
//! ```

use clap::Parser;

use mondou_client::{runner::run_client, session::ClientRole};
use mondou_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for Mondou live Q&A sessions", long_about = None)]
struct Args {
    /// WebSocket URL of the session server
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Role to join as
    #[arg(short, long, value_enum, default_value = "respondent")]
    role: ClientRole,

    /// Display name shown to other participants
    #[arg(short, long, default_value = "anonymous")]
    name: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing (quiet by default; RUST_LOG overrides)
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.role, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
