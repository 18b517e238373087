//! UseCase: アラート受理処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AcceptAlertUseCase::execute() メソッド
//! - オペレーターによる受理（accepted フラグと受理時刻の設定）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：受理はアクティブリスト内のアラートにのみ作用する
//! - 存在しない ID への受理が no-op になることを保証（回復可能な条件）
//!
//! ### どのような状況を想定しているか
//! - 正常系：pending アラートの受理
//! - 異常系：不正な ID 文字列
//! - エッジケース：存在しない ID・アーカイブ済みアラートへの受理

use std::sync::Arc;

use kinkyu_shared::time::now_jst_millis;

use crate::domain::{Alert, AlertId, BoardRepository, MessagePusher, Timestamp};

use super::error::ModerateAlertError;

/// アラート受理のユースケース
pub struct AcceptAlertUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl AcceptAlertUseCase {
    /// 新しい AcceptAlertUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// アラート受理を実行
    ///
    /// # Arguments
    ///
    /// * `alert_id` - 受理対象のアラート ID（ワイヤの生の値）
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Alert))` - 受理成功（変更後のアラート）
    /// * `Ok(None)` - 対象が存在しない（no-op、ブロードキャストなし）
    /// * `Err(ModerateAlertError)` - 不正な入力
    pub async fn execute(&self, alert_id: String) -> Result<Option<Alert>, ModerateAlertError> {
        let id = AlertId::new(alert_id)?;
        let accepted_at = Timestamp::new(now_jst_millis());

        let accepted = self.repository.accept_alert(&id, accepted_at).await?;

        if accepted.is_none() {
            // 未知の ID は回復可能な条件として黙殺する（重複・遅延コマンドへの耐性）
            tracing::debug!("ACCEPT_ALERT for unknown alert '{}' ignored", id.as_str());
        }

        Ok(accepted)
    }

    /// ALERT_UPDATED を全コネクションにブロードキャスト
    pub async fn broadcast_alert_updated(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::AlertEvidence;
    use crate::domain::message_pusher::MockMessagePusher;
    use crate::domain::value_object::{AlertIdFactory, Location, Severity, UserId};
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

    async fn open_test_alert(repository: &InMemoryBoardRepository) -> AlertId {
        let id = AlertIdFactory::generate().unwrap();
        let alert = Alert::open(
            id.clone(),
            Timestamp::new(1000),
            Severity::Critical,
            Location::new("12.97, 77.59".to_string()).unwrap(),
            UserId::new("U1".to_string()).unwrap(),
            AlertEvidence::default(),
        );
        repository.open_alert(alert).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_accept_alert_success() {
        // テスト項目: pending アラートの受理が成功する
        // given (前提条件):
        let repository = create_test_repository();
        let id = open_test_alert(&repository).await;
        let usecase = AcceptAlertUseCase::new(repository.clone(), create_noop_pusher());

        // when (操作):
        let result = usecase.execute(id.as_str().to_string()).await;

        // then (期待する結果):
        let accepted = result.unwrap().expect("accept should succeed");
        assert!(accepted.accepted);
        assert!(accepted.accepted_at.is_some());
        assert!(!accepted.resolved);

        // アクティブリストに残っている
        let snapshot = repository.snapshot().await.unwrap();
        assert_eq!(snapshot.alerts.len(), 1);
        assert!(snapshot.alerts[0].accepted);
    }

    #[tokio::test]
    async fn test_accept_unknown_alert_is_noop() {
        // テスト項目: 存在しない ID の受理が no-op になる（状態変更なし）
        // given (前提条件):
        let repository = create_test_repository();
        let known = open_test_alert(&repository).await;
        let usecase = AcceptAlertUseCase::new(repository.clone(), create_noop_pusher());
        let unknown = AlertIdFactory::generate().unwrap();

        // when (操作):
        let result = usecase.execute(unknown.as_str().to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        let snapshot = repository.snapshot().await.unwrap();
        let alert = snapshot.alerts.iter().find(|a| a.id == known).unwrap();
        assert!(!alert.accepted);
    }

    #[tokio::test]
    async fn test_accept_invalid_id_is_rejected() {
        // テスト項目: 空文字の ID はバリデーションエラーになる
        // given (前提条件):
        let usecase = AcceptAlertUseCase::new(create_test_repository(), create_noop_pusher());

        // when (操作):
        let result = usecase.execute("".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ModerateAlertError::InvalidAlertId(DomainError::EmptyAlertId))
        );
    }

    #[tokio::test]
    async fn test_broadcast_alert_updated_reaches_pusher() {
        // テスト項目: ALERT_UPDATED のブロードキャストが MessagePusher に渡される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast_all()
            .withf(|message| message.contains("ALERT_UPDATED"))
            .times(1)
            .returning(|_| Ok(()));
        let usecase = AcceptAlertUseCase::new(create_test_repository(), Arc::new(pusher));

        // when (操作):
        let result = usecase
            .broadcast_alert_updated(r#"{"type":"ALERT_UPDATED","payload":{}}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
