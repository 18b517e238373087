//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    AcceptAlertUseCase, ArchiveAlertUseCase, ConnectClientUseCase, DisconnectClientUseCase,
    GetBoardStateUseCase, ReportAlertUseCase, ToggleDisasterUseCase, UpdateLocationUseCase,
    UpdateSimulationUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// ReportAlertUseCase（新規アラート通報のユースケース）
    pub report_alert_usecase: Arc<ReportAlertUseCase>,
    /// AcceptAlertUseCase（アラート受理のユースケース）
    pub accept_alert_usecase: Arc<AcceptAlertUseCase>,
    /// ArchiveAlertUseCase（アラートアーカイブのユースケース）
    pub archive_alert_usecase: Arc<ArchiveAlertUseCase>,
    /// UpdateLocationUseCase（位置更新のユースケース）
    pub update_location_usecase: Arc<UpdateLocationUseCase>,
    /// ToggleDisasterUseCase（災害モード切り替えのユースケース）
    pub toggle_disaster_usecase: Arc<ToggleDisasterUseCase>,
    /// UpdateSimulationUseCase（シミュレーションフラグ更新のユースケース）
    pub update_simulation_usecase: Arc<UpdateSimulationUseCase>,
    /// GetBoardStateUseCase（ボード状態取得のユースケース）
    pub get_board_state_usecase: Arc<GetBoardStateUseCase>,
}
