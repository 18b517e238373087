//! UseCase 層
//!
//! 受信メッセージ一件につき一つの状態遷移を実行するアプリケーションサービス群。
//! 各 UseCase は Repository（状態の正本）と MessagePusher（ファンアウト）の
//! 抽象にのみ依存します。

mod accept_alert;
mod archive_alert;
mod connect_client;
mod disconnect_client;
pub mod error;
mod get_board_state;
mod report_alert;
mod toggle_disaster;
mod update_location;
mod update_simulation;

pub use accept_alert::AcceptAlertUseCase;
pub use archive_alert::ArchiveAlertUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{
    ConnectError, LocationUpdateError, ModerateAlertError, ReportAlertError, SimulationError,
};
pub use get_board_state::GetBoardStateUseCase;
pub use report_alert::{NewAlertInput, ReportAlertUseCase};
pub use toggle_disaster::ToggleDisasterUseCase;
pub use update_location::{LocationUpdateOutcome, UpdateLocationUseCase};
pub use update_simulation::UpdateSimulationUseCase;
