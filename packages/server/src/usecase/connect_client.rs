//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() / build_snapshot() メソッド
//! - コネクションのファンアウト登録と接続時スナップショットの構築
//!
//! ### なぜこのテストが必要か
//! - 接続直後のクライアントは INIT_DATA で自己完結した初期状態を受け取る契約
//! - スナップショットが接続時点のアクティブ・履歴・ユーザー位置・
//!   モードフラグを全て含むことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のボードへの接続、状態が積み上がったボードへの接続
//! - エッジケース：複数コネクションの同時登録

use std::sync::Arc;

use crate::domain::{AlertBoard, BoardRepository, MessagePusher, PusherChannel};

use super::error::ConnectError;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn BoardRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// クライアント接続を実行
    ///
    /// コネクションをファンアウト集合へ登録する。認証・重複チェックはない
    /// （コネクション ID はサーバー側で採番されるため衝突しない）。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - サーバー側で採番されたコネクション ID
    /// * `sender` - このコネクションへの送信チャンネル
    ///
    /// # Returns
    ///
    /// 登録後のコネクション数
    pub async fn execute(&self, connection_id: String, sender: PusherChannel) -> usize {
        self.message_pusher.register(connection_id, sender).await;
        self.message_pusher.connection_count().await
    }

    /// 接続時スナップショット（INIT_DATA の材料）を構築
    ///
    /// # Returns
    ///
    /// 接続時点のボード全体
    pub async fn build_snapshot(&self) -> Result<AlertBoard, ConnectError> {
        let board = self.repository.snapshot().await?;
        Ok(board)
    }
}
