//! CLI operator console for the kinkyu emergency-alert relay.
//!
//! Connects to the relay over WebSocket, renders every broadcast as text,
//! and turns typed commands into protocol messages.

mod command;
mod console;
mod error;
mod formatter;
mod runner;
mod session;

pub use runner::run_client;
