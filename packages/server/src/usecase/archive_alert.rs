//! UseCase: アラートアーカイブ処理（対応完了・却下）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ArchiveAlertUseCase::execute() メソッド
//! - アラートのアーカイブ（アクティブリストから履歴への移動）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：アーカイブは「移動」であり、
//!   アラートが両方のリストに存在する瞬間はない
//! - 二重 resolve / reject が冪等であることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：受理済みアラートの対応完了、pending アラートの却下
//! - エッジケース：存在しない ID・二重アーカイブ（no-op）

use std::sync::Arc;

use kinkyu_shared::time::now_jst_millis;

use crate::domain::{Alert, AlertId, BoardRepository, MessagePusher, Resolution, Timestamp};

use super::error::ModerateAlertError;

/// アラートアーカイブのユースケース
pub struct ArchiveAlertUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ArchiveAlertUseCase {
    /// 新しい ArchiveAlertUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// アラートアーカイブを実行
    ///
    /// # Arguments
    ///
    /// * `alert_id` - 対象のアラート ID（ワイヤの生の値）
    /// * `resolution` - 処理区分（対応完了 or 却下）
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Alert))` - アーカイブ成功（履歴へ移動したアラート）
    /// * `Ok(None)` - 対象が存在しない（no-op、ブロードキャストなし）
    /// * `Err(ModerateAlertError)` - 不正な入力
    pub async fn execute(
        &self,
        alert_id: String,
        resolution: Resolution,
    ) -> Result<Option<Alert>, ModerateAlertError> {
        let id = AlertId::new(alert_id)?;
        let resolved_at = Timestamp::new(now_jst_millis());

        let archived = self
            .repository
            .archive_alert(&id, resolved_at, resolution)
            .await?;

        if archived.is_none() {
            // 既にアーカイブ済み・未知の ID は黙殺する（冪等なアーカイブ）
            tracing::debug!(
                "{:?} for unknown or already archived alert '{}' ignored",
                resolution,
                id.as_str()
            );
        }

        Ok(archived)
    }

    /// ALERT_RESOLVED を全コネクションにブロードキャスト
    pub async fn broadcast_alert_resolved(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
