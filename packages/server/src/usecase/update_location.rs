//! UseCase: 通報ユーザーの位置更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateLocationUseCase::execute() メソッド
//! - ユーザー位置の upsert と、同一ユーザーのアクティブアラートへの反映
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：同じ userId の位置は常に最新の一件のみ保持される
//! - ブロードキャストに載せる activeUsers スナップショットが
//!   更新後の状態を写し取ることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの位置登録、既存ユーザーの位置更新
//! - 異常系：不正な userId・位置情報
//! - エッジケース：アクティブアラートを持つユーザーの移動

use std::collections::HashMap;
use std::sync::Arc;

use kinkyu_shared::time::now_jst_millis;

use crate::domain::{
    ActiveUser, BoardRepository, Location, MessagePusher, Timestamp, UserId,
};

use super::error::LocationUpdateError;

/// 位置更新の結果
///
/// ブロードキャスト（USER_LOCATION_UPDATED）の材料になる。
#[derive(Debug, Clone, PartialEq)]
pub struct LocationUpdateOutcome {
    pub user_id: UserId,
    pub location: Location,
    pub full_address: Option<String>,
    /// 更新後の全ユーザー位置スナップショット
    pub active_users: HashMap<String, ActiveUser>,
}

/// 位置更新のユースケース
pub struct UpdateLocationUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateLocationUseCase {
    /// 新しい UpdateLocationUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 位置更新を実行
    ///
    /// # Arguments
    ///
    /// * `user_id` - 通報クライアントの ID（ワイヤの生の値）
    /// * `location` - 座標文字列（ワイヤの生の値）
    /// * `full_address` - 逆ジオコーディング結果（欠損可）
    ///
    /// # Returns
    ///
    /// * `Ok(LocationUpdateOutcome)` - 更新成功
    /// * `Err(LocationUpdateError)` - 不正な入力
    pub async fn execute(
        &self,
        user_id: String,
        location: String,
        full_address: Option<String>,
    ) -> Result<LocationUpdateOutcome, LocationUpdateError> {
        let user_id = UserId::new(user_id)?;
        let location = Location::new(location)?;
        let last_seen = Timestamp::new(now_jst_millis());

        let active_users = self
            .repository
            .update_user_location(&user_id, location.clone(), full_address.clone(), last_seen)
            .await?;

        Ok(LocationUpdateOutcome {
            user_id,
            location,
            full_address,
            active_users,
        })
    }

    /// USER_LOCATION_UPDATED を全コネクションにブロードキャスト
    pub async fn broadcast_user_location_updated(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
