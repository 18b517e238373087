//! UseCase: シミュレーションフラグ更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateSimulationUseCase::merge_traffic() / set_map_view_mode() メソッド
//! - 交通シミュレーションフラグの部分マージとマップ表示モードの切り替え
//!
//! ### なぜこのテストが必要か
//! - 部分更新のマージで「指定されなかったフラグが維持される」ことを保証
//! - 未知のマップ表示モードが状態を汚染しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：フラグの段階的な更新、表示モードの変更
//! - 異常系：未知の表示モード文字列

use std::sync::Arc;

use crate::domain::{
    BoardRepository, MapViewMode, MessagePusher, TrafficSimPatch, TrafficSimulation,
};

use super::error::SimulationError;

/// シミュレーションフラグ更新のユースケース
pub struct UpdateSimulationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateSimulationUseCase {
    /// 新しい UpdateSimulationUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 交通シミュレーションフラグをマージ更新
    ///
    /// # Arguments
    ///
    /// * `patch` - 部分更新（`None` のフィールドは現在値を維持）
    ///
    /// # Returns
    ///
    /// マージ後のフラグ一式
    pub async fn merge_traffic(
        &self,
        patch: TrafficSimPatch,
    ) -> Result<TrafficSimulation, SimulationError> {
        let merged = self.repository.merge_traffic_simulation(patch).await?;
        Ok(merged)
    }

    /// マップ表示モードを設定
    ///
    /// # Arguments
    ///
    /// * `mode` - 表示モード文字列（ワイヤの生の値）
    pub async fn set_map_view_mode(&self, mode: &str) -> Result<MapViewMode, SimulationError> {
        let mode = MapViewMode::parse(mode)?;
        let mode = self.repository.set_map_view_mode(mode).await?;
        Ok(mode)
    }

    /// TRAFFIC_SIM_UPDATED / MAP_VIEW_MODE_UPDATED を全コネクションにブロードキャスト
    pub async fn broadcast_simulation_event(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message_pusher::MockMessagePusher;
    use crate::domain::{AlertBoard, DomainError};
    use crate::infrastructure::repository::InMemoryBoardRepository;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryBoardRepository> {
        let board = Arc::new(Mutex::new(AlertBoard::new()));
        Arc::new(InMemoryBoardRepository::new(board))
    }

    fn create_noop_pusher() -> Arc<MockMessagePusher> {
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast_all().returning(|_| Ok(()));
        Arc::new(pusher)
    }

    #[tokio::test]
    async fn test_merge_traffic_partial_update() {
        // テスト項目: 部分更新で指定されなかったフラグが維持される
        // given (前提条件):
        let usecase = UpdateSimulationUseCase::new(create_test_repository(), create_noop_pusher());
        usecase
            .merge_traffic(TrafficSimPatch {
                active: Some(true),
                heavy_traffic: Some(true),
                road_closures: None,
            })
            .await
            .unwrap();

        // when (操作): road_closures のみ指定して更新
        let merged = usecase
            .merge_traffic(TrafficSimPatch {
                active: None,
                heavy_traffic: None,
                road_closures: Some(true),
            })
            .await
            .unwrap();

        // then (期待する結果):
        assert!(merged.active);
        assert!(merged.heavy_traffic);
        assert!(merged.road_closures);
    }

    #[tokio::test]
    async fn test_set_map_view_mode_success() {
        // テスト項目: 表示モードの変更がスナップショットに反映される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UpdateSimulationUseCase::new(repository.clone(), create_noop_pusher());

        // when (操作):
        let mode = usecase.set_map_view_mode("satellite").await.unwrap();

        // then (期待する結果):
        assert_eq!(mode, MapViewMode::Satellite);
        let snapshot = repository.snapshot().await.unwrap();
        assert_eq!(snapshot.map_view_mode, MapViewMode::Satellite);
    }

    #[tokio::test]
    async fn test_set_unknown_map_view_mode_is_rejected() {
        // テスト項目: 未知の表示モードはエラーになり、状態を変更しない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = UpdateSimulationUseCase::new(repository.clone(), create_noop_pusher());

        // when (操作):
        let result = usecase.set_map_view_mode("globe").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SimulationError::InvalidPayload(
                DomainError::UnknownMapViewMode("globe".to_string())
            ))
        );
        let snapshot = repository.snapshot().await.unwrap();
        assert_eq!(snapshot.map_view_mode, MapViewMode::Standard);
    }
}
