//! WebSocket console session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use kinkyu_server::infrastructure::dto::websocket::OutboundMessage;

use crate::{
    command::{ConsoleInput, help_text, parse_command},
    console::redisplay_prompt,
    error::ClientError,
    formatter::MessageFormatter,
};

/// Run one console session against the relay
pub async fn run_client_session(
    url: &str,
    user_id: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with the informational role as query parameter
    let url = format!("{}?role={}", url, role);

    let (ws_stream, _response) = connect_async(&url)
        .await
        .map_err(|e| Box::new(ClientError::ConnectionError(e.to_string())))?;

    tracing::info!("Connected to alert relay!");
    println!(
        "\nYou are '{}' ({}). Type commands and press Enter to send ('help' for the reference). Press Ctrl+C to exit.\n",
        user_id, role
    );

    let (mut write, mut read) = ws_stream.split();

    // Clone user_id for read task
    let user_id_for_read = user_id.to_string();

    // Spawn a task to handle incoming broadcasts
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundMessage>(&text) {
                        Ok(OutboundMessage::InitData(payload)) => {
                            MessageFormatter::format_init_data(&payload)
                        }
                        Ok(OutboundMessage::AlertCreated(alert)) => {
                            MessageFormatter::format_alert_created(&alert)
                        }
                        Ok(OutboundMessage::AlertUpdated(alert)) => {
                            MessageFormatter::format_alert_updated(&alert)
                        }
                        Ok(OutboundMessage::AlertResolved(payload)) => {
                            MessageFormatter::format_alert_resolved(
                                &payload.alert_id,
                                &payload.resolved_alert,
                            )
                        }
                        Ok(OutboundMessage::UserLocationUpdated(payload)) => {
                            MessageFormatter::format_user_location(&payload)
                        }
                        Ok(OutboundMessage::DisasterActivated(mode)) => {
                            MessageFormatter::format_disaster_activated(&mode)
                        }
                        Ok(OutboundMessage::DisasterDeactivated(_)) => {
                            MessageFormatter::format_disaster_deactivated()
                        }
                        Ok(OutboundMessage::TrafficSimUpdated(sim)) => {
                            MessageFormatter::format_traffic_sim(&sim)
                        }
                        Ok(OutboundMessage::MapViewModeUpdated(payload)) => {
                            MessageFormatter::format_map_view_mode(&payload.mode)
                        }
                        // Unknown broadcasts are displayed raw rather than dropped
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&user_id_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Clone user_id for the input loop
    let user_id = user_id.to_string();
    let user_id_for_prompt = user_id.clone();

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", user_id_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to parse console input and send protocol messages
    let user_id_for_write = user_id.clone();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let message = match parse_command(&line, &user_id_for_write) {
                Ok(ConsoleInput::Message(message)) => message,
                Ok(ConsoleInput::Help) => {
                    println!("{}", help_text());
                    redisplay_prompt(&user_id_for_write);
                    continue;
                }
                Err(e) => {
                    println!("{}", e);
                    redisplay_prompt(&user_id_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}
