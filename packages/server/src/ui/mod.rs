//! UI 層（ネットワーク境界）
//!
//! axum のルーター・ハンドラと、コネクションのライフサイクル管理を提供します。

pub mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
