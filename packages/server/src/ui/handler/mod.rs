//! HTTP / WebSocket handlers.

pub mod http;
pub mod websocket;

pub use http::{debug_board_state, get_active_alerts, get_alert_history, health_check};
pub use websocket::websocket_handler;
