//! UseCase: 災害モード切り替え処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ToggleDisasterUseCase::activate() / deactivate() メソッド
//! - プロセス全体で共有される災害モードフラグの切り替え
//!
//! ### なぜこのテストが必要か
//! - 災害モードは全クライアントの表示を切り替えるグローバルフラグであり、
//!   有効化の時刻・種別が正しく記録される必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：有効化と解除
//! - 異常系：災害種別が空の有効化
//! - エッジケース：有効化の上書き（種別の変更）

use std::sync::Arc;

use kinkyu_shared::time::now_jst_millis;

use crate::domain::{BoardRepository, DisasterMode, DomainError, MessagePusher, Timestamp};

use super::error::SimulationError;

/// 災害モード切り替えのユースケース
pub struct ToggleDisasterUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ToggleDisasterUseCase {
    /// 新しい ToggleDisasterUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 災害モードを有効化
    ///
    /// # Arguments
    ///
    /// * `disaster_type` - 災害種別（ワイヤの生の値、空は不可）
    pub async fn activate(&self, disaster_type: String) -> Result<DisasterMode, SimulationError> {
        if disaster_type.trim().is_empty() {
            return Err(SimulationError::InvalidPayload(
                DomainError::EmptyDisasterType,
            ));
        }
        let activated_at = Timestamp::new(now_jst_millis());

        let mode = self
            .repository
            .activate_disaster(disaster_type, activated_at)
            .await?;

        Ok(mode)
    }

    /// 災害モードを解除
    pub async fn deactivate(&self) -> Result<(), SimulationError> {
        self.repository.deactivate_disaster().await?;
        Ok(())
    }

    /// DISASTER_ACTIVATED / DISASTER_DEACTIVATED を全コネクションにブロードキャスト
    pub async fn broadcast_disaster_event(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
