//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    AcceptAlertUseCase, ArchiveAlertUseCase, ConnectClientUseCase, DisconnectClientUseCase,
    GetBoardStateUseCase, ReportAlertUseCase, ToggleDisasterUseCase, UpdateLocationUseCase,
    UpdateSimulationUseCase,
};

use super::{
    handler::{
        debug_board_state, get_active_alerts, get_alert_history, health_check, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Emergency-alert relay server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     report_alert_usecase,
///     // ...
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// ReportAlertUseCase（新規アラート通報のユースケース）
    report_alert_usecase: Arc<ReportAlertUseCase>,
    /// AcceptAlertUseCase（アラート受理のユースケース）
    accept_alert_usecase: Arc<AcceptAlertUseCase>,
    /// ArchiveAlertUseCase（アラートアーカイブのユースケース）
    archive_alert_usecase: Arc<ArchiveAlertUseCase>,
    /// UpdateLocationUseCase（位置更新のユースケース）
    update_location_usecase: Arc<UpdateLocationUseCase>,
    /// ToggleDisasterUseCase（災害モード切り替えのユースケース）
    toggle_disaster_usecase: Arc<ToggleDisasterUseCase>,
    /// UpdateSimulationUseCase（シミュレーションフラグ更新のユースケース）
    update_simulation_usecase: Arc<UpdateSimulationUseCase>,
    /// GetBoardStateUseCase（ボード状態取得のユースケース）
    get_board_state_usecase: Arc<GetBoardStateUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        report_alert_usecase: Arc<ReportAlertUseCase>,
        accept_alert_usecase: Arc<AcceptAlertUseCase>,
        archive_alert_usecase: Arc<ArchiveAlertUseCase>,
        update_location_usecase: Arc<UpdateLocationUseCase>,
        toggle_disaster_usecase: Arc<ToggleDisasterUseCase>,
        update_simulation_usecase: Arc<UpdateSimulationUseCase>,
        get_board_state_usecase: Arc<GetBoardStateUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            report_alert_usecase,
            accept_alert_usecase,
            archive_alert_usecase,
            update_location_usecase,
            toggle_disaster_usecase,
            update_simulation_usecase,
            get_board_state_usecase,
        }
    }

    /// Run the alert relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase,
            disconnect_client_usecase: self.disconnect_client_usecase,
            report_alert_usecase: self.report_alert_usecase,
            accept_alert_usecase: self.accept_alert_usecase,
            archive_alert_usecase: self.archive_alert_usecase,
            update_location_usecase: self.update_location_usecase,
            toggle_disaster_usecase: self.toggle_disaster_usecase,
            update_simulation_usecase: self.update_simulation_usecase,
            get_board_state_usecase: self.get_board_state_usecase,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/alerts", get(get_active_alerts))
            .route("/api/alerts/history", get(get_alert_history))
            .route("/debug/board", get(debug_board_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Emergency-alert relay server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
