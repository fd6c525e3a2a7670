//! WebSocket client session management.

use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use mondou_server::infrastructure::dto::websocket::{
    ChatRelayMessage, ClientMessage, ParticipantsUpdateMessage, PollResultsMessage,
    QuestionDto, QuestionErrorMessage, QuestionStartedMessage, QuestionStatusMessage,
    TimeUpdateMessage,
};
use mondou_shared::time::get_jst_timestamp;

use crate::{
    command::{Command, parse_command},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Role to join the session with
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClientRole {
    /// Start questions and remove respondents
    Moderator,
    /// Answer questions
    Respondent,
}

impl ClientRole {
    pub fn as_str(&self) -> &str {
        match self {
            ClientRole::Moderator => "moderator",
            ClientRole::Respondent => "respondent",
        }
    }
}

/// Run the Q&A client session
pub async fn run_client_session(
    url: &str,
    role: ClientRole,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with role and display name as query parameters
    let request_url = format!("{}?role={}&display_name={}", url, role.as_str(), name);

    let (ws_stream, response) = match connect_async(&request_url).await {
        Ok(result) => result,
        Err(e) => {
            let error_msg = e.to_string();

            // HTTP 400: bad role or display name; retrying won't help
            if error_msg.contains("400") || error_msg.contains("Bad Request") {
                return Err(Box::new(ClientError::Rejected(error_msg)));
            }

            return Err(Box::new(ClientError::ConnectionError(error_msg)));
        }
    };

    if response.status().as_u16() == 400 {
        return Err(Box::new(ClientError::Rejected(
            "invalid role or display name".to_string(),
        )));
    }

    tracing::info!("Connected to Q&A session!");
    println!(
        "\nYou are '{}' ({}). Plain lines are chat. Commands: /answer /ask /remove /quit.\n",
        name,
        role.as_str()
    );

    let (mut write, mut read) = ws_stream.split();

    // Shared with the read task: the question currently open (for /answer)
    // and whether the moderator removed us (no reconnect in that case)
    let current_question: Arc<StdMutex<Option<QuestionDto>>> = Arc::new(StdMutex::new(None));
    let removed = Arc::new(AtomicBool::new(false));

    // Spawn a task to handle incoming notifications
    let name_for_read = name.to_string();
    let question_for_read = current_question.clone();
    let removed_for_read = removed.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let message = match message {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match message {
                Message::Text(text) => {
                    handle_server_message(
                        text.as_str(),
                        &name_for_read,
                        &question_for_read,
                        &removed_for_read,
                    );
                    if removed_for_read.load(Ordering::SeqCst) {
                        break;
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                _ => {}
            }
        }
    });

    // Read prompt input on a blocking thread and forward lines as events
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{} > ", name);
    let input_task = tokio::task::spawn_blocking(move || {
        let Ok(mut editor) = DefaultEditor::new() else {
            tracing::error!("Failed to initialize the input prompt");
            return;
        };
        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Prompt error: {}", e);
                    break;
                }
            }
        }
    });

    let mut user_exit = false;
    loop {
        tokio::select! {
            maybe_line = line_rx.recv() => {
                match maybe_line {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match parse_command(&line) {
                            Ok(Command::Quit) => {
                                user_exit = true;
                                break;
                            }
                            Ok(command) => {
                                let Some(message) =
                                    build_message(command, role, name, &current_question)
                                else {
                                    continue;
                                };
                                let json = serde_json::to_string(&message).unwrap();
                                if write.send(Message::Text(json.into())).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => println!("{}", e),
                        }
                    }
                    None => {
                        // Prompt closed (Ctrl+C / Ctrl+D)
                        user_exit = true;
                        break;
                    }
                }
            }
            _ = &mut read_task => {
                break;
            }
        }
    }

    input_task.abort();
    read_task.abort();

    if removed.load(Ordering::SeqCst) {
        return Err(Box::new(ClientError::Removed));
    }
    if user_exit {
        return Ok(());
    }
    Err(Box::new(ClientError::ConnectionError(
        "connection closed by server".to_string(),
    )))
}

/// Turn a parsed command into an outbound message, or `None` when the
/// command only produces local feedback.
fn build_message(
    command: Command,
    role: ClientRole,
    name: &str,
    current_question: &StdMutex<Option<QuestionDto>>,
) -> Option<ClientMessage> {
    match command {
        Command::Chat(text) => Some(ClientMessage::ChatMessage {
            payload: serde_json::json!({"from": name, "text": text}),
        }),
        Command::Answer(option) => {
            let question_id = current_question
                .lock()
                .unwrap()
                .as_ref()
                .map(|question| question.id.clone());
            let Some(question_id) = question_id else {
                println!("No open question to answer.");
                return None;
            };
            Some(ClientMessage::SubmitAnswer {
                question_id,
                respondent_name: name.to_string(),
                answer: option,
            })
        }
        Command::Ask {
            text,
            options,
            time_limit,
        } => {
            if role != ClientRole::Moderator {
                println!("Only the moderator can start questions.");
                return None;
            }
            Some(ClientMessage::StartQuestion {
                question: QuestionDto {
                    // Caller-generated id; millisecond timestamps are unique
                    // enough for one moderator
                    id: format!("q-{}", get_jst_timestamp()),
                    text,
                    options,
                    time_limit,
                },
            })
        }
        Command::Remove(display_name) => {
            if role != ClientRole::Moderator {
                println!("Only the moderator can remove respondents.");
                return None;
            }
            Some(ClientMessage::RemoveParticipant { display_name })
        }
        // Handled by the caller before building a message
        Command::Quit => None,
    }
}

/// Render one server message and update local session state.
fn handle_server_message(
    text: &str,
    own_name: &str,
    current_question: &StdMutex<Option<QuestionDto>>,
    removed: &AtomicBool,
) {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
        print!("{}", MessageFormatter::format_raw_message(text));
        redisplay_prompt(own_name);
        return;
    };

    let formatted = match value["type"].as_str() {
        Some("participants-update") => serde_json::from_value::<ParticipantsUpdateMessage>(value.clone())
            .ok()
            .map(|m| MessageFormatter::format_participants(&m.participants, own_name)),
        Some("question-started") => serde_json::from_value::<QuestionStartedMessage>(value.clone())
            .ok()
            .map(|m| {
                *current_question.lock().unwrap() = Some(m.question.clone());
                MessageFormatter::format_question(&m.question, m.sequence_number)
            }),
        Some("time-update") => serde_json::from_value::<TimeUpdateMessage>(value.clone())
            .ok()
            .map(|m| MessageFormatter::format_time_update(m.remaining)),
        Some("poll-results") => serde_json::from_value::<PollResultsMessage>(value.clone())
            .ok()
            .map(|m| {
                *current_question.lock().unwrap() = None;
                MessageFormatter::format_results(&m.results, m.sequence_number, &m.question_text)
            }),
        Some("question-status") => serde_json::from_value::<QuestionStatusMessage>(value.clone())
            .ok()
            .map(|m| {
                if m.can_ask_new {
                    "\nYou can start a new question with /ask.\n".to_string()
                } else {
                    "\nA question is in progress.\n".to_string()
                }
            }),
        Some("question-error") => serde_json::from_value::<QuestionErrorMessage>(value.clone())
            .ok()
            .map(|m| MessageFormatter::format_question_error(&m.message)),
        Some("participant-removed") => {
            removed.store(true, Ordering::SeqCst);
            Some(MessageFormatter::format_removed())
        }
        Some("chat-message") => serde_json::from_value::<ChatRelayMessage>(value.clone())
            .ok()
            .map(|m| MessageFormatter::format_chat(&m.payload)),
        _ => Some(MessageFormatter::format_raw_message(text)),
    };

    if let Some(formatted) = formatted {
        print!("{}", formatted);
        redisplay_prompt(own_name);
    }
}
