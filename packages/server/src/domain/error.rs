//! ドメイン層のエラー型定義

use thiserror::Error;

/// 値オブジェクト生成時のバリデーションエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// アラート ID が空
    #[error("Alert ID must not be empty")]
    EmptyAlertId,

    /// ユーザー ID が空
    #[error("User ID must not be empty")]
    EmptyUserId,

    /// ユーザー ID が長すぎる
    #[error("User ID is too long: {0} chars")]
    UserIdTooLong(usize),

    /// 位置情報が空
    #[error("Location must not be empty")]
    EmptyLocation,

    /// 災害種別が空
    #[error("Disaster type must not be empty")]
    EmptyDisasterType,

    /// 未知のマップ表示モード
    #[error("Unknown map view mode: '{0}'")]
    UnknownMapViewMode(String),
}

/// Repository 操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// 指定されたアラートが存在しない
    #[error("Alert '{0}' not found")]
    AlertNotFound(String),
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// 指定されたコネクションが登録されていない
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// 送信チャンネルへの書き込みに失敗
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
