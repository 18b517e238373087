//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ通知のインターフェースを定義します。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;

/// コネクションへの送信チャンネル
///
/// 送信はチャンネルへの enqueue のみで、相手ソケットの書き込みを待たない。
/// 受信が遅いクライアントがルーターをブロックしないための分離点。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ通知の抽象化
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションを登録
    async fn register(&self, connection_id: String, sender: PusherChannel);

    /// コネクションを登録解除
    async fn unregister(&self, connection_id: &str);

    /// 特定のコネクションにのみ送信（接続時スナップショット用）
    async fn push_to(&self, connection_id: &str, content: &str) -> Result<(), MessagePushError>;

    /// 登録中の全コネクションへブロードキャスト
    ///
    /// 一部のコネクションへの送信失敗は許容し、残りへの配送を続ける。
    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError>;

    /// 登録中のコネクション数
    async fn connection_count(&self) -> usize;
}
