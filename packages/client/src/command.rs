//! Command parsing for the operator console.
//!
//! This module contains pure functions that turn typed console lines into
//! protocol messages, without side effects, making them easy to test.

use kinkyu_server::infrastructure::dto::websocket::{
    ActivateDisasterPayload, AlertRefPayload, EmptyPayload, InboundMessage, LocationUpdatePayload,
    MapViewModePayload, NewAlertPayload, TrafficSimPayload,
};
use thiserror::Error;

/// One parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    /// A protocol message to send to the relay
    Message(InboundMessage),
    /// Show the command reference
    Help,
}

/// Command parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown command word
    #[error("Unknown command: '{0}' (type 'help' for the command reference)")]
    UnknownCommand(String),

    /// A required argument is missing
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// A flag argument is not 'on' or 'off'
    #[error("Expected 'on' or 'off', got '{0}'")]
    InvalidFlag(String),
}

const SEVERITIES: [&str; 3] = ["critical", "medium", "low"];

/// Parse one console line into a protocol message.
///
/// # Arguments
///
/// * `line` - The raw console line (already trimmed, non-empty)
/// * `user_id` - The console's reporting user id, stamped onto alert and
///   location messages
pub fn parse_command(line: &str, user_id: &str) -> Result<ConsoleInput, ParseError> {
    let mut tokens = line.split_whitespace();
    let command = tokens.next().unwrap_or_default().to_ascii_lowercase();
    let rest: Vec<&str> = tokens.collect();

    match command.as_str() {
        "help" => Ok(ConsoleInput::Help),
        "alert" => parse_alert(&rest, user_id),
        "accept" => parse_alert_ref(&rest, InboundMessage::AcceptAlert),
        "resolve" => parse_alert_ref(&rest, InboundMessage::ResolveAlert),
        "reject" => parse_alert_ref(&rest, InboundMessage::RejectAlert),
        "loc" => parse_location(&rest, user_id),
        "disaster" => parse_disaster(&rest),
        "traffic" => parse_traffic(&rest),
        "view" => parse_view(&rest),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// `alert <lat,lon> [critical|medium|low] [transcript…]`
fn parse_alert(args: &[&str], user_id: &str) -> Result<ConsoleInput, ParseError> {
    let location = args
        .first()
        .ok_or(ParseError::MissingArgument("location (\"lat,lon\")"))?;

    let (urgency, transcript_start) = match args.get(1) {
        Some(word) if SEVERITIES.contains(&word.to_ascii_lowercase().as_str()) => {
            (Some(word.to_string()), 2)
        }
        _ => (None, 1),
    };

    let transcript = if args.len() > transcript_start {
        Some(args[transcript_start..].join(" "))
    } else {
        None
    };

    Ok(ConsoleInput::Message(InboundMessage::NewAlert(
        NewAlertPayload {
            location: location.to_string(),
            user_id: user_id.to_string(),
            urgency,
            full_address: None,
            transcript,
            ai_reasoning: None,
            video_data: None,
            video_analysis: None,
        },
    )))
}

/// `accept|resolve|reject <id>`
fn parse_alert_ref(
    args: &[&str],
    build: impl FnOnce(AlertRefPayload) -> InboundMessage,
) -> Result<ConsoleInput, ParseError> {
    let id = args.first().ok_or(ParseError::MissingArgument("alert id"))?;
    Ok(ConsoleInput::Message(build(AlertRefPayload {
        id: id.to_string(),
    })))
}

/// `loc <lat,lon> [address…]`
fn parse_location(args: &[&str], user_id: &str) -> Result<ConsoleInput, ParseError> {
    let location = args
        .first()
        .ok_or(ParseError::MissingArgument("location (\"lat,lon\")"))?;

    let full_address = if args.len() > 1 {
        Some(args[1..].join(" "))
    } else {
        None
    };

    Ok(ConsoleInput::Message(InboundMessage::LocationUpdate(
        LocationUpdatePayload {
            user_id: user_id.to_string(),
            location: location.to_string(),
            full_address,
        },
    )))
}

/// `disaster <type>` / `disaster off`
fn parse_disaster(args: &[&str]) -> Result<ConsoleInput, ParseError> {
    let arg = args
        .first()
        .ok_or(ParseError::MissingArgument("disaster type or 'off'"))?;

    if arg.eq_ignore_ascii_case("off") {
        return Ok(ConsoleInput::Message(InboundMessage::DeactivateDisaster(
            EmptyPayload {},
        )));
    }

    Ok(ConsoleInput::Message(InboundMessage::ActivateDisaster(
        ActivateDisasterPayload {
            disaster_type: arg.to_string(),
        },
    )))
}

/// `traffic on|off` / `traffic heavy on|off` / `traffic closures on|off`
fn parse_traffic(args: &[&str]) -> Result<ConsoleInput, ParseError> {
    let first = args
        .first()
        .ok_or(ParseError::MissingArgument("'on', 'off', 'heavy' or 'closures'"))?;

    let payload = match first.to_ascii_lowercase().as_str() {
        "heavy" => TrafficSimPayload {
            heavy_traffic: Some(parse_flag(args.get(1))?),
            ..Default::default()
        },
        "closures" => TrafficSimPayload {
            road_closures: Some(parse_flag(args.get(1))?),
            ..Default::default()
        },
        _ => TrafficSimPayload {
            active: Some(parse_flag(Some(first))?),
            ..Default::default()
        },
    };

    Ok(ConsoleInput::Message(InboundMessage::UpdateTrafficSim(
        payload,
    )))
}

/// `view <standard|satellite|heatmap>`
fn parse_view(args: &[&str]) -> Result<ConsoleInput, ParseError> {
    let mode = args.first().ok_or(ParseError::MissingArgument("view mode"))?;
    Ok(ConsoleInput::Message(InboundMessage::SetMapViewMode(
        MapViewModePayload {
            mode: mode.to_string(),
        },
    )))
}

fn parse_flag(arg: Option<&&str>) -> Result<bool, ParseError> {
    match arg {
        Some(word) if word.eq_ignore_ascii_case("on") => Ok(true),
        Some(word) if word.eq_ignore_ascii_case("off") => Ok(false),
        Some(word) => Err(ParseError::InvalidFlag(word.to_string())),
        None => Err(ParseError::MissingArgument("'on' or 'off'")),
    }
}

/// Command reference shown by `help`
pub fn help_text() -> &'static str {
    "\
Commands:
  alert <lat,lon> [critical|medium|low] [transcript…]   report a new alert
  accept <id>                                           accept an alert
  resolve <id>                                          archive an alert as resolved
  reject <id>                                           archive an alert as rejected
  loc <lat,lon> [address…]                              update your location
  disaster <type> | disaster off                        toggle disaster mode
  traffic on|off | traffic heavy on|off | traffic closures on|off
                                                        update traffic simulation
  view standard|satellite|heatmap                       set the map view mode
  help                                                  show this reference
"
}
