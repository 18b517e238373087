//! Kinkyu relay server library.
//!
//! The relay accepts alert lifecycle events from many concurrent clients
//! over WebSocket, applies them to a single in-memory alert board, and
//! re-broadcasts every change to all connected clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
