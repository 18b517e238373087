//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの `UnboundedSender` を管理
//! - 接続直後のスナップショット送信（push_to）と全体ブロードキャスト（broadcast_all）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! ブロードキャストはチャンネルへの enqueue のみで完結し、相手ソケットの
//! 書き込み完了を待たない。切断済み・詰まったコネクションへの送信失敗は
//! ログに記録してスキップし、残りのコネクションへの配送を続ける。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のコネクションの送信チャンネル
    ///
    /// Key: connection_id (String)
    /// Value: PusherChannel
    connections: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(connections: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register(&self, connection_id: String, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister(&self, connection_id: &str) {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(&self, connection_id: &str, content: &str) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        if let Some(sender) = connections.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.to_string(),
            ))
        }
    }

    async fn broadcast_all(&self, content: &str) -> Result<(), MessagePushError> {
        let connections = self.connections.lock().await;

        for (connection_id, sender) in connections.iter() {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                );
            } else {
                tracing::debug!("Broadcasted message to connection '{}'", connection_id);
            }
        }

        Ok(())
    }

    async fn connection_count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的なメッセージ送信機能
    // - push_to: 特定のコネクションへの送信（スナップショット配送）
    // - broadcast_all: 全コネクションへの送信
    // - エラーハンドリング（存在しない・切断済みコネクション）
    //
    // 【なぜこのテストが必要か】
    // - MessagePusher は UseCase から呼ばれる通信層の中核
    // - 「一つの壊れたコネクションが他へのブロードキャストを妨げない」が
    //   ファンアウトの中心的な契約である
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース
    // 2. push_to の失敗ケース（コネクションが存在しない）
    // 3. broadcast_all の成功ケース（全コネクションに届く）
    // 4. broadcast_all の部分失敗ケース（受信側が閉じていても継続）
    // 5. 登録解除後は配送されないこと
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<String, PusherChannel>>>,
    ) {
        let connections = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(connections.clone());
        (pusher, connections)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のコネクションにメッセージを送信できる
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register("conn-1".to_string(), tx).await;

        // when (操作):
        let result = pusher.push_to("conn-1", "snapshot").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("snapshot".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しないコネクションへの送信はエラーを返す
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();

        // when (操作):
        let result = pusher.push_to("nonexistent", "snapshot").await;

        // then (期待する結果):
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::ConnectionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_all_reaches_every_connection() {
        // テスト項目: ブロードキャストが登録中の全コネクションに届く
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register("conn-1".to_string(), tx1).await;
        pusher.register("conn-2".to_string(), tx2).await;

        // when (操作):
        let result = pusher.broadcast_all("state changed").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("state changed".to_string()));
        assert_eq!(rx2.recv().await, Some("state changed".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_all_skips_closed_receiver() {
        // テスト項目: 受信側が閉じたコネクションがあっても残りへ配送される
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register("broken".to_string(), tx1).await;
        pusher.register("healthy".to_string(), tx2).await;
        drop(rx1); // 受信側を閉じる

        // when (操作):
        let result = pusher.broadcast_all("state changed").await;

        // then (期待する結果): ブロードキャストは部分失敗を許容
        assert!(result.is_ok());
        assert_eq!(rx2.recv().await, Some("state changed".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_all_with_no_connections() {
        // テスト項目: コネクションが一つもなくてもエラーにならない
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();

        // when (操作):
        let result = pusher.broadcast_all("state changed").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregistered_connection_stops_receiving() {
        // テスト項目: 登録解除したコネクションにはブロードキャストが届かない
        // given (前提条件):
        let (pusher, _connections) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register("leaving".to_string(), tx1).await;
        pusher.register("staying".to_string(), tx2).await;
        assert_eq!(pusher.connection_count().await, 2);

        // when (操作):
        pusher.unregister("leaving").await;
        pusher.broadcast_all("after leave").await.unwrap();

        // then (期待する結果):
        assert_eq!(pusher.connection_count().await, 1);
        assert_eq!(rx2.recv().await, Some("after leave".to_string()));
        // 解除済みのチャンネルには何も送られていない
        assert!(rx1.try_recv().is_err());
    }
}
