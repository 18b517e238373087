//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::collections::HashMap;

use async_trait::async_trait;

use super::{
    entity::{ActiveUser, Alert, AlertBoard, DisasterMode, TrafficSimulation},
    error::RepositoryError,
    value_object::{AlertId, Location, MapViewMode, Resolution, Timestamp, TrafficSimPatch, UserId},
};

/// アラートボード Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## 直列化の契約
///
/// 各メソッド呼び出しはボードに対して原子的に作用すること。
/// 二つのミューテーションが交錯して観測されることはない
/// （InMemory 実装では単一の Mutex がこの契約を担う）。
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// ボード全体のスナップショットを取得
    async fn snapshot(&self) -> Result<AlertBoard, RepositoryError>;

    /// 新規アラートをアクティブリストへ追加
    async fn open_alert(&self, alert: Alert) -> Result<(), RepositoryError>;

    /// アラートを受理（存在しない ID は `None`）
    async fn accept_alert(
        &self,
        id: &AlertId,
        at: Timestamp,
    ) -> Result<Option<Alert>, RepositoryError>;

    /// アラートをアーカイブし履歴へ移動（存在しない ID は `None`）
    async fn archive_alert(
        &self,
        id: &AlertId,
        at: Timestamp,
        resolution: Resolution,
    ) -> Result<Option<Alert>, RepositoryError>;

    /// 通報ユーザーの位置を upsert し、更新後の全ユーザー位置を返す
    async fn update_user_location(
        &self,
        user_id: &UserId,
        location: Location,
        full_address: Option<String>,
        at: Timestamp,
    ) -> Result<HashMap<String, ActiveUser>, RepositoryError>;

    /// 災害モードを有効化し、新しいフラグを返す
    async fn activate_disaster(
        &self,
        disaster_type: String,
        at: Timestamp,
    ) -> Result<DisasterMode, RepositoryError>;

    /// 災害モードを解除
    async fn deactivate_disaster(&self) -> Result<(), RepositoryError>;

    /// 交通シミュレーションフラグをマージし、マージ後の値を返す
    async fn merge_traffic_simulation(
        &self,
        patch: TrafficSimPatch,
    ) -> Result<TrafficSimulation, RepositoryError>;

    /// マップ表示モードを設定
    async fn set_map_view_mode(&self, mode: MapViewMode) -> Result<MapViewMode, RepositoryError>;

    /// アクティブなアラート数を取得
    async fn count_active_alerts(&self) -> usize;
}
