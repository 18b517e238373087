//! WebSocket connection handlers.
//!
//! One task pair per connection: the receive loop parses inbound frames and
//! dispatches them to the usecases (the event-routing step), the push loop
//! drains the connection's outbox channel into the socket.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    domain::{Resolution, TrafficSimPatch},
    infrastructure::dto::{
        conversion::convert_active_users,
        websocket::{
            EmptyPayload, InboundMessage, MapViewModePayload, NewAlertPayload, OutboundMessage,
            UserLocationUpdatedPayload,
        },
    },
    ui::state::AppState,
    usecase::NewAlertInput,
};

/// Query parameters for WebSocket connection
///
/// `role` is informational only (user / admin); it is recorded in logs and
/// never affects routing, since every broadcast reaches every connection.
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub role: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    // Connection ids are assigned server-side, so they cannot collide and
    // there is no duplicate-id rejection path.
    let connection_id = Uuid::new_v4().to_string();
    let role = query.role.unwrap_or_else(|| "user".to_string());

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, role))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: broadcasts from the
/// usecases (via the rx channel) are sent to this client's WebSocket
/// connection. A slow client only stalls its own outbox here, never the
/// event routing.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: String, role: String) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive broadcasts
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the connection into the fan-out set
    let connection_count = state
        .connect_client_usecase
        .execute(connection_id.clone(), tx)
        .await;
    tracing::info!(
        "Connection '{}' (role: {}) registered ({} connections open)",
        connection_id,
        role,
        connection_count
    );

    // Send the full snapshot to the newly connected client.
    // INIT_DATA goes onto the socket before the outbox starts draining, so
    // the client always has a self-consistent base state before it sees any
    // incremental update.
    {
        let board = match state.connect_client_usecase.build_snapshot().await {
            Ok(board) => board,
            Err(e) => {
                tracing::error!("Failed to build snapshot for '{}': {}", connection_id, e);
                state.disconnect_client_usecase.execute(&connection_id).await;
                return;
            }
        };

        let init_message = OutboundMessage::InitData(board.into());
        let Some(init_json) = encode(&init_message) else {
            state.disconnect_client_usecase.execute(&connection_id).await;
            return;
        };
        if let Err(e) = sender.send(Message::Text(init_json.into())).await {
            tracing::error!("Failed to send INIT_DATA to '{}': {}", connection_id, e);
            state.disconnect_client_usecase.execute(&connection_id).await;
            return;
        }
        tracing::info!("Sent INIT_DATA to '{}'", connection_id);
    }

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_frame(&state_clone, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to receive broadcasts and send them to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Deregister on disconnect. No broadcast: connection lifecycle is not
    // part of the shared board state.
    let remaining = state.disconnect_client_usecase.execute(&connection_id).await;
    tracing::info!(
        "Connection '{}' disconnected and removed from fan-out set ({} connections remain)",
        connection_id,
        remaining
    );
}

/// Serialize an outbound message, logging instead of propagating on failure.
fn encode(message: &OutboundMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize outbound message: {}", e);
            None
        }
    }
}

fn new_alert_input(payload: NewAlertPayload) -> NewAlertInput {
    NewAlertInput {
        location: payload.location,
        user_id: payload.user_id,
        urgency: payload.urgency,
        full_address: payload.full_address,
        transcript: payload.transcript,
        ai_reasoning: payload.ai_reasoning,
        video_data: payload.video_data,
        video_analysis: payload.video_analysis,
    }
}

/// Parse one inbound frame and apply exactly one state transition.
///
/// Errors are contained per frame: malformed or invalid frames are logged
/// and dropped, the connection and the process stay up, and no broadcast
/// goes out for a frame that changed nothing.
async fn dispatch_frame(state: &Arc<AppState>, text: &str) {
    let inbound = match serde_json::from_str::<InboundMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Malformed inbound frame dropped: {}", e);
            return;
        }
    };

    match inbound {
        InboundMessage::NewAlert(payload) => {
            match state
                .report_alert_usecase
                .execute(new_alert_input(payload))
                .await
            {
                Ok(alert) => {
                    tracing::info!(
                        "Alert '{}' created by user '{}' ({})",
                        alert.id.as_str(),
                        alert.user_id.as_str(),
                        alert.status
                    );
                    let message = OutboundMessage::AlertCreated(alert.into());
                    if let Some(json) = encode(&message)
                        && let Err(e) = state.report_alert_usecase.broadcast_alert_created(&json).await
                    {
                        tracing::warn!("Failed to broadcast ALERT_CREATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("NEW_ALERT dropped: {}", e);
                }
            }
        }
        InboundMessage::AcceptAlert(payload) => {
            match state.accept_alert_usecase.execute(payload.id).await {
                Ok(Some(alert)) => {
                    tracing::info!("Alert '{}' accepted", alert.id.as_str());
                    let message = OutboundMessage::AlertUpdated(alert.into());
                    if let Some(json) = encode(&message)
                        && let Err(e) = state.accept_alert_usecase.broadcast_alert_updated(&json).await
                    {
                        tracing::warn!("Failed to broadcast ALERT_UPDATED: {}", e);
                    }
                }
                // Unknown id: no mutation happened, so nothing is broadcast
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("ACCEPT_ALERT dropped: {}", e);
                }
            }
        }
        InboundMessage::ResolveAlert(payload) => {
            archive_alert(state, payload.id, Resolution::Resolved).await;
        }
        InboundMessage::RejectAlert(payload) => {
            archive_alert(state, payload.id, Resolution::Rejected).await;
        }
        InboundMessage::LocationUpdate(payload) => {
            match state
                .update_location_usecase
                .execute(payload.user_id, payload.location, payload.full_address)
                .await
            {
                Ok(outcome) => {
                    let message = OutboundMessage::UserLocationUpdated(UserLocationUpdatedPayload {
                        user_id: outcome.user_id.into_string(),
                        location: outcome.location.into_string(),
                        full_address: outcome.full_address,
                        active_users: convert_active_users(outcome.active_users),
                    });
                    if let Some(json) = encode(&message)
                        && let Err(e) = state
                            .update_location_usecase
                            .broadcast_user_location_updated(&json)
                            .await
                    {
                        tracing::warn!("Failed to broadcast USER_LOCATION_UPDATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("LOCATION_UPDATE dropped: {}", e);
                }
            }
        }
        InboundMessage::ActivateDisaster(payload) => {
            match state
                .toggle_disaster_usecase
                .activate(payload.disaster_type)
                .await
            {
                Ok(mode) => {
                    tracing::info!(
                        "Disaster mode activated: {}",
                        mode.disaster_type.as_deref().unwrap_or("unknown")
                    );
                    let message = OutboundMessage::DisasterActivated(mode.into());
                    if let Some(json) = encode(&message)
                        && let Err(e) = state
                            .toggle_disaster_usecase
                            .broadcast_disaster_event(&json)
                            .await
                    {
                        tracing::warn!("Failed to broadcast DISASTER_ACTIVATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("ACTIVATE_DISASTER dropped: {}", e);
                }
            }
        }
        InboundMessage::DeactivateDisaster(_) => {
            match state.toggle_disaster_usecase.deactivate().await {
                Ok(()) => {
                    tracing::info!("Disaster mode deactivated");
                    let message = OutboundMessage::DisasterDeactivated(EmptyPayload {});
                    if let Some(json) = encode(&message)
                        && let Err(e) = state
                            .toggle_disaster_usecase
                            .broadcast_disaster_event(&json)
                            .await
                    {
                        tracing::warn!("Failed to broadcast DISASTER_DEACTIVATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("DEACTIVATE_DISASTER dropped: {}", e);
                }
            }
        }
        InboundMessage::UpdateTrafficSim(payload) => {
            let patch = TrafficSimPatch {
                active: payload.active,
                heavy_traffic: payload.heavy_traffic,
                road_closures: payload.road_closures,
            };
            match state.update_simulation_usecase.merge_traffic(patch).await {
                Ok(simulation) => {
                    let message = OutboundMessage::TrafficSimUpdated(simulation.into());
                    if let Some(json) = encode(&message)
                        && let Err(e) = state
                            .update_simulation_usecase
                            .broadcast_simulation_event(&json)
                            .await
                    {
                        tracing::warn!("Failed to broadcast TRAFFIC_SIM_UPDATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("UPDATE_TRAFFIC_SIM dropped: {}", e);
                }
            }
        }
        InboundMessage::SetMapViewMode(payload) => {
            match state
                .update_simulation_usecase
                .set_map_view_mode(&payload.mode)
                .await
            {
                Ok(mode) => {
                    let message = OutboundMessage::MapViewModeUpdated(MapViewModePayload {
                        mode: mode.to_string(),
                    });
                    if let Some(json) = encode(&message)
                        && let Err(e) = state
                            .update_simulation_usecase
                            .broadcast_simulation_event(&json)
                            .await
                    {
                        tracing::warn!("Failed to broadcast MAP_VIEW_MODE_UPDATED: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("SET_MAP_VIEW_MODE dropped: {}", e);
                }
            }
        }
    }
}

/// Shared path for RESOLVE_ALERT / REJECT_ALERT.
async fn archive_alert(state: &Arc<AppState>, alert_id: String, resolution: Resolution) {
    match state.archive_alert_usecase.execute(alert_id, resolution).await {
        Ok(Some(alert)) => {
            tracing::info!(
                "Alert '{}' archived as {}",
                alert.id.as_str(),
                resolution
            );
            let message = OutboundMessage::AlertResolved(
                crate::infrastructure::dto::websocket::AlertResolvedPayload {
                    alert_id: alert.id.as_str().to_string(),
                    resolved_alert: alert.into(),
                },
            );
            if let Some(json) = encode(&message)
                && let Err(e) = state.archive_alert_usecase.broadcast_alert_resolved(&json).await
            {
                tracing::warn!("Failed to broadcast ALERT_RESOLVED: {}", e);
            }
        }
        // Unknown or already archived id: idempotent no-op
        Ok(None) => {}
        Err(e) => {
            tracing::warn!("{:?} dropped: {}", resolution, e);
        }
    }
}
