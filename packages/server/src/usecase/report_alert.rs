//! UseCase: 新規アラート通報処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReportAlertUseCase::execute() メソッド
//! - 新規アラートの作成（ID・作成時刻のサーバー側採番、深刻度のデフォルト）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：アラートは必ず pending 状態でアクティブリストに入る
//! - 外部分類器の結果が欠損・不正でも通報がブロックされないことを保証
//! - ALERT_CREATED ブロードキャストが全コネクションに届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：深刻度付きの通報
//! - 異常系：位置情報・ユーザー ID が不正な通報
//! - エッジケース：urgency 欠損時の Critical デフォルト

use std::sync::Arc;

use kinkyu_shared::time::now_jst_millis;

use crate::domain::{
    Alert, AlertIdFactory, BoardRepository, Location, MessagePusher, Severity, Timestamp, UserId,
    entity::AlertEvidence,
};

use super::error::ReportAlertError;

/// 新規アラート通報の入力
///
/// ワイヤペイロードの生の値。値オブジェクトへの変換は UseCase 内で行う。
#[derive(Debug, Clone, Default)]
pub struct NewAlertInput {
    pub location: String,
    pub user_id: String,
    pub urgency: Option<String>,
    pub full_address: Option<String>,
    pub transcript: Option<String>,
    pub ai_reasoning: Option<String>,
    pub video_data: Option<String>,
    pub video_analysis: Option<String>,
}

/// 新規アラート通報のユースケース
pub struct ReportAlertUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReportAlertUseCase {
    /// 新しい ReportAlertUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 新規アラート通報を実行
    ///
    /// # Arguments
    ///
    /// * `input` - ワイヤペイロードの生の値
    ///
    /// # Returns
    ///
    /// * `Ok(Alert)` - 作成されたアラート（ID・作成時刻はサーバー側採番）
    /// * `Err(ReportAlertError)` - 作成失敗
    pub async fn execute(&self, input: NewAlertInput) -> Result<Alert, ReportAlertError> {
        // 1. ワイヤの生の値を値オブジェクトへ変換
        let location = Location::new(input.location)?;
        let user_id = UserId::new(input.user_id)?;
        // 深刻度は欠損・未知の値を Critical に倒す（通報をブロックしない）
        let status = Severity::from_wire(input.urgency.as_deref());

        // 2. ID と作成時刻をサーバー側で採番
        let id = AlertIdFactory::generate()?;
        let created_at = Timestamp::new(now_jst_millis());

        let alert = Alert::open(
            id,
            created_at,
            status,
            location,
            user_id,
            AlertEvidence {
                full_address: input.full_address,
                transcript: input.transcript,
                ai_reasoning: input.ai_reasoning,
                video_data: input.video_data,
                video_analysis: input.video_analysis,
            },
        );

        // 3. Repository 経由でアクティブリストへ追加
        self.repository.open_alert(alert.clone()).await?;

        Ok(alert)
    }

    /// ALERT_CREATED を全コネクションにブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `message` - ブロードキャストするメッセージ（JSON、DTO 層で生成されたもの）
    pub async fn broadcast_alert_created(&self, message: &str) -> Result<(), String> {
        self.message_pusher
            .broadcast_all(message)
            .await
            .map_err(|e| e.to_string())
    }
}
