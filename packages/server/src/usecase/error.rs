//! UseCase 層のエラー型定義

use thiserror::Error;

use crate::domain::{DomainError, RepositoryError};

/// クライアント接続処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// スナップショットの取得に失敗
    #[error("Failed to take board snapshot: {0}")]
    SnapshotFailed(#[from] RepositoryError),
}

/// 新規アラート通報処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportAlertError {
    /// ペイロードの値がドメインの制約を満たさない
    #[error("Invalid alert payload: {0}")]
    InvalidPayload(#[from] DomainError),

    /// Repository 操作に失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 受理・アーカイブ処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModerateAlertError {
    /// アラート ID がドメインの制約を満たさない
    #[error("Invalid alert id: {0}")]
    InvalidAlertId(#[from] DomainError),

    /// Repository 操作に失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// 位置更新処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationUpdateError {
    /// ペイロードの値がドメインの制約を満たさない
    #[error("Invalid location payload: {0}")]
    InvalidPayload(#[from] DomainError),

    /// Repository 操作に失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// モードフラグ更新処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// ペイロードの値がドメインの制約を満たさない
    #[error("Invalid simulation payload: {0}")]
    InvalidPayload(#[from] DomainError),

    /// Repository 操作に失敗
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
