//! CLI operator console for the kinkyu emergency-alert relay.
//!
//! Connects to the relay, renders every broadcast, and turns typed commands
//! into protocol messages.
//!
//! Run with:
//! ```not_rust
//! cargo run -p kinkyu-client -- --user-id U1
//! cargo run -p kinkyu-client -- --url ws://127.0.0.1:3000/ws --user-id OP1 --role admin
//! ```

use clap::Parser;
use kinkyu_client::run_client;
use kinkyu_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kinkyu-client")]
#[command(about = "CLI operator console for the emergency-alert relay", long_about = None)]
struct Args {
    /// WebSocket URL of the relay server
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Reporting user id stamped onto alert and location messages
    #[arg(short = 'i', long)]
    user_id: String,

    /// Connection role (user or admin), informational only
    #[arg(short = 'r', long, default_value = "user")]
    role: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("kinkyu_client", "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.user_id, args.role).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
