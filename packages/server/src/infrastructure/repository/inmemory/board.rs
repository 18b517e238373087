//! InMemory アラートボード Repository 実装
//!
//! ドメイン層が定義する `BoardRepository` trait の具体的な実装。
//! `AlertBoard` 集約を単一の `tokio::sync::Mutex` で保持します。
//!
//! ## 直列化ポイント
//!
//! 参照実装はシングルスレッドのイベントループ上で動作していたため、
//! ミューテーションの交錯がそもそも発生しなかった。マルチスレッドの
//! tokio ランタイムではこの Mutex が同じ保証を再現する：
//! 全てのミューテーションはロック取得順に全順序化される。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ActiveUser, Alert, AlertBoard, AlertId, BoardRepository, DisasterMode, Location, MapViewMode,
    RepositoryError, Resolution, Timestamp, TrafficSimPatch, TrafficSimulation, UserId,
};

/// インメモリ アラートボード Repository 実装
pub struct InMemoryBoardRepository {
    /// アラートボード集約（共有状態の正本）
    board: Arc<Mutex<AlertBoard>>,
}

impl InMemoryBoardRepository {
    /// 新しい InMemoryBoardRepository を作成
    pub fn new(board: Arc<Mutex<AlertBoard>>) -> Self {
        Self { board }
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn snapshot(&self) -> Result<AlertBoard, RepositoryError> {
        let board = self.board.lock().await;
        Ok(board.clone())
    }

    async fn open_alert(&self, alert: Alert) -> Result<(), RepositoryError> {
        let mut board = self.board.lock().await;
        board.open_alert(alert);
        Ok(())
    }

    async fn accept_alert(
        &self,
        id: &AlertId,
        at: Timestamp,
    ) -> Result<Option<Alert>, RepositoryError> {
        let mut board = self.board.lock().await;
        Ok(board.accept_alert(id, at))
    }

    async fn archive_alert(
        &self,
        id: &AlertId,
        at: Timestamp,
        resolution: Resolution,
    ) -> Result<Option<Alert>, RepositoryError> {
        // 削除と履歴追加は同一ロック区間内で行われる
        let mut board = self.board.lock().await;
        Ok(board.archive_alert(id, at, resolution))
    }

    async fn update_user_location(
        &self,
        user_id: &UserId,
        location: Location,
        full_address: Option<String>,
        at: Timestamp,
    ) -> Result<HashMap<String, ActiveUser>, RepositoryError> {
        let mut board = self.board.lock().await;
        board.update_user_location(user_id, location, full_address, at);
        Ok(board.active_users.clone())
    }

    async fn activate_disaster(
        &self,
        disaster_type: String,
        at: Timestamp,
    ) -> Result<DisasterMode, RepositoryError> {
        let mut board = self.board.lock().await;
        Ok(board.activate_disaster(disaster_type, at))
    }

    async fn deactivate_disaster(&self) -> Result<(), RepositoryError> {
        let mut board = self.board.lock().await;
        board.deactivate_disaster();
        Ok(())
    }

    async fn merge_traffic_simulation(
        &self,
        patch: TrafficSimPatch,
    ) -> Result<TrafficSimulation, RepositoryError> {
        let mut board = self.board.lock().await;
        Ok(board.merge_traffic_simulation(patch))
    }

    async fn set_map_view_mode(&self, mode: MapViewMode) -> Result<MapViewMode, RepositoryError> {
        let mut board = self.board.lock().await;
        Ok(board.set_map_view_mode(mode))
    }

    async fn count_active_alerts(&self) -> usize {
        let board = self.board.lock().await;
        board.alerts.len()
    }
}
