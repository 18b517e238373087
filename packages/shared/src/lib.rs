//! Shared utilities for the kinkyu emergency-alert relay.
//!
//! This crate holds the cross-cutting pieces used by both the relay server
//! and the CLI console: time handling (JST timestamps, RFC 3339 formatting)
//! and logging setup.

pub mod logger;
pub mod time;
