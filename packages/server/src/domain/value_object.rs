//! 値オブジェクト定義
//!
//! アラートボードを構成する不変の値型を定義します。
//! 生成時にバリデーションを行い、不正な値がドメインに入らないことを保証します。

use serde::Serialize;
use uuid::Uuid;

use super::error::DomainError;

/// アラート ID（プロセス内で一意、サーバー側で採番）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AlertId(String);

impl AlertId {
    /// 新しい AlertId を作成（空文字は不可）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyAlertId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for AlertId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// AlertId の採番ファクトリ
///
/// UUID v4 を使用するため、プロセス生存期間内での衝突は実用上発生しない。
pub struct AlertIdFactory;

impl AlertIdFactory {
    /// 新しい AlertId を採番
    pub fn generate() -> Result<AlertId, DomainError> {
        AlertId::new(Uuid::new_v4().to_string())
    }
}

/// 通報クライアントの ID（クライアント申告、認証なし）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(String);

impl UserId {
    /// ユーザー ID の最大長
    pub const MAX_LEN: usize = 64;

    /// 新しい UserId を作成（空文字・長すぎる値は不可）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyUserId);
        }
        if value.len() > Self::MAX_LEN {
            return Err(DomainError::UserIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 位置情報（"lat, lon" 形式の生文字列）
///
/// 逆ジオコーディングの結果（住所文字列）は別フィールドで保持するため、
/// ここでは座標文字列が空でないことのみ保証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location(String);

impl Location {
    /// 新しい Location を作成（空文字は不可）
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::EmptyLocation);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Location {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// タイムスタンプ（JST の Unix ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 新しい Timestamp を作成
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 深刻度の分類
///
/// 外部の分類器（AI）から渡される値。未知の値・欠損は Critical に倒す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Critical,
    Medium,
    Low,
}

impl Severity {
    /// 文字列から深刻度をパース（大文字小文字は区別しない）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "critical" => Some(Self::Critical),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// ワイヤ上の `urgency` フィールドから深刻度を決定する
    ///
    /// 欠損・未知の値は安全側（Critical）にデフォルトする。
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or(Self::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// アーカイブ時の処理区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// 対応完了
    Resolved,
    /// 却下
    Rejected,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 管理画面のマップ表示モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MapViewMode {
    #[default]
    Standard,
    Satellite,
    Heatmap,
}

impl MapViewMode {
    /// 文字列からマップ表示モードをパース（大文字小文字は区別しない）
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "satellite" => Ok(Self::Satellite),
            "heatmap" => Ok(Self::Heatmap),
            other => Err(DomainError::UnknownMapViewMode(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Satellite => "satellite",
            Self::Heatmap => "heatmap",
        }
    }
}

impl std::fmt::Display for MapViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 交通シミュレーションフラグの部分更新
///
/// `None` のフィールドは現在値を維持する（マージ更新）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficSimPatch {
    pub active: Option<bool>,
    pub heavy_traffic: Option<bool>,
    pub road_closures: Option<bool>,
}
