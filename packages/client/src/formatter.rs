//! Message formatting utilities for console display.

use kinkyu_server::infrastructure::dto::websocket::{
    AlertDto, DisasterModeDto, InitDataPayload, TrafficSimDto, UserLocationUpdatedPayload,
};

/// Message formatter for console display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the initial snapshot received right after connecting
    pub fn format_init_data(payload: &InitDataPayload) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!(
            "Board snapshot: {} active, {} archived, {} users\n",
            payload.alerts.len(),
            payload.history.len(),
            payload.active_users.len()
        ));

        for alert in &payload.alerts {
            output.push_str(&Self::format_alert_line(alert));
        }

        if payload.disaster_mode.active {
            output.push_str(&format!(
                "!! disaster mode active: {}\n",
                payload.disaster_mode.disaster_type.as_deref().unwrap_or("unknown")
            ));
        }
        if payload.traffic_simulation.active {
            output.push_str("!! traffic simulation active\n");
        }
        output.push_str(&format!("map view: {}\n", payload.map_view_mode));
        output.push_str("============================================================\n");
        output
    }

    /// Format a newly created alert
    pub fn format_alert_created(alert: &AlertDto) -> String {
        format!(
            "\n+ [{}] alert {} from {} at {} ({})\n{}",
            alert.status,
            alert.id,
            alert.user_id,
            alert.location,
            alert.timestamp,
            alert
                .transcript
                .as_deref()
                .map(|t| format!("  transcript: {}\n", t))
                .unwrap_or_default()
        )
    }

    /// Format an accepted alert
    pub fn format_alert_updated(alert: &AlertDto) -> String {
        format!(
            "\n* alert {} accepted at {}\n",
            alert.id,
            alert.accepted_at.as_deref().unwrap_or("?")
        )
    }

    /// Format an archived alert
    pub fn format_alert_resolved(alert_id: &str, alert: &AlertDto) -> String {
        format!(
            "\n- alert {} archived as {} at {}\n",
            alert_id,
            alert.resolution_type.as_deref().unwrap_or("?"),
            alert.resolved_at.as_deref().unwrap_or("?")
        )
    }

    /// Format a user location update
    pub fn format_user_location(payload: &UserLocationUpdatedPayload) -> String {
        format!(
            "\n~ {} moved to {}{} ({} users tracked)\n",
            payload.user_id,
            payload.location,
            payload
                .full_address
                .as_deref()
                .map(|a| format!(" ({})", a))
                .unwrap_or_default(),
            payload.active_users.len()
        )
    }

    /// Format a disaster mode activation
    pub fn format_disaster_activated(mode: &DisasterModeDto) -> String {
        format!(
            "\n!! disaster mode activated: {} at {}\n",
            mode.disaster_type.as_deref().unwrap_or("unknown"),
            mode.activated_at.as_deref().unwrap_or("?")
        )
    }

    /// Format a disaster mode deactivation
    pub fn format_disaster_deactivated() -> String {
        "\n!! disaster mode deactivated\n".to_string()
    }

    /// Format a traffic simulation update
    pub fn format_traffic_sim(sim: &TrafficSimDto) -> String {
        format!(
            "\n~ traffic simulation: {} (heavy: {}, closures: {})\n",
            if sim.active { "on" } else { "off" },
            sim.heavy_traffic,
            sim.road_closures
        )
    }

    /// Format a map view mode change
    pub fn format_map_view_mode(mode: &str) -> String {
        format!("\n~ map view mode: {}\n", mode)
    }

    /// Format a message that did not parse as a known broadcast
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }

    fn format_alert_line(alert: &AlertDto) -> String {
        format!(
            "  [{}] {} from {} at {}{}\n",
            alert.status,
            alert.id,
            alert.user_id,
            alert.location,
            if alert.accepted { " (accepted)" } else { "" }
        )
    }
}
