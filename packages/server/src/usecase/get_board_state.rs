//! UseCase: ボード状態取得処理
//!
//! HTTP API（アラート一覧・履歴一覧・デバッグ用ダンプ）が読み取りに使う。
//! この UseCase は状態を変更しない。

use std::sync::Arc;

use crate::domain::{AlertBoard, BoardRepository, RepositoryError};

/// ボード状態取得のユースケース
pub struct GetBoardStateUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
}

impl GetBoardStateUseCase {
    /// 新しい GetBoardStateUseCase を作成
    pub fn new(repository: Arc<dyn BoardRepository>) -> Self {
        Self { repository }
    }

    /// ボード全体のスナップショットを取得
    pub async fn execute(&self) -> Result<AlertBoard, RepositoryError> {
        self.repository.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::AlertEvidence;
    use crate::domain::value_object::{AlertIdFactory, Location, Severity, Timestamp, UserId};
    use crate::domain::Alert;
    use crate::infrastructure::repository::InMemoryBoardRepository;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[tokio::test]
    async fn test_get_board_state_returns_snapshot() {
        // テスト項目: ボード状態のスナップショットが取得できる
        // given (前提条件):
        let board = Arc::new(Mutex::new(AlertBoard::new()));
        let repository = Arc::new(InMemoryBoardRepository::new(board));
        let alert = Alert::open(
            AlertIdFactory::generate().unwrap(),
            Timestamp::new(1000),
            Severity::Low,
            Location::new("1, 1".to_string()).unwrap(),
            UserId::new("U1".to_string()).unwrap(),
            AlertEvidence::default(),
        );
        repository.open_alert(alert).await.unwrap();
        let usecase = GetBoardStateUseCase::new(repository);

        // when (操作):
        let snapshot = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.alerts.len(), 1);
        assert_eq!(snapshot.alerts[0].status, Severity::Low);
    }
}
