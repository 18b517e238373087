//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - コネクションのファンアウト集合からの登録解除
//!
//! ### なぜこのテストが必要か
//! - 切断済みコネクションへのブロードキャスト試行を残さないため
//! - 切断は他クライアントへ通知されない（ボードの状態ではない）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録済みコネクションの切断
//! - エッジケース：未登録コネクションの切断（冪等）

use std::sync::Arc;

use crate::domain::MessagePusher;

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// クライアント切断を実行
    ///
    /// コネクションをファンアウト集合から取り除く。ボードの状態
    /// （アクティブアラート・ユーザー位置）には作用しない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断するコネクションの ID
    ///
    /// # Returns
    ///
    /// 登録解除後の残りコネクション数
    pub async fn execute(&self, connection_id: &str) -> usize {
        self.message_pusher.unregister(connection_id).await;
        self.message_pusher.connection_count().await
    }
}
