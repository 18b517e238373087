//! Real-time emergency-alert relay server.
//!
//! Accepts alert lifecycle events from many concurrent clients over
//! WebSocket, mutates a single in-memory alert board, and re-broadcasts
//! every change to all connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run -p kinkyu-server
//! cargo run -p kinkyu-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use kinkyu_server::{
    domain::AlertBoard,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryBoardRepository},
    ui::Server,
    usecase::{
        AcceptAlertUseCase, ArchiveAlertUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetBoardStateUseCase, ReportAlertUseCase, ToggleDisasterUseCase, UpdateLocationUseCase,
        UpdateSimulationUseCase,
    },
};
use kinkyu_shared::logger::setup_logger;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "kinkyu-server")]
#[command(about = "Real-time emergency-alert relay server", long_about = None)]
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
    setup_logger("kinkyu_server", "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory alert board, reset on restart)
    let board = Arc::new(Mutex::new(AlertBoard::new()));
    let repository = Arc::new(InMemoryBoardRepository::new(board));

    // 2. Create MessagePusher (WebSocket implementation)
    let connections = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(connections));

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let report_alert_usecase = Arc::new(ReportAlertUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let accept_alert_usecase = Arc::new(AcceptAlertUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let archive_alert_usecase = Arc::new(ArchiveAlertUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let update_location_usecase = Arc::new(UpdateLocationUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let toggle_disaster_usecase = Arc::new(ToggleDisasterUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let update_simulation_usecase = Arc::new(UpdateSimulationUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));
    let get_board_state_usecase = Arc::new(GetBoardStateUseCase::new(repository.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        report_alert_usecase,
        accept_alert_usecase,
        archive_alert_usecase,
        update_location_usecase,
        toggle_disaster_usecase,
        update_simulation_usecase,
        get_board_state_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
