//! エンティティ定義
//!
//! アラートボード（`AlertBoard`）が唯一の集約ルートであり、
//! アクティブアラート・履歴・通報ユーザーの現在位置・モードフラグを所有します。
//!
//! ## ライフサイクル不変条件
//!
//! アラートは常に pending / accepted / archived のいずれか一つの状態にあり、
//! 遷移は pending → accepted → archived または pending → archived の一方向のみ。
//! アーカイブされた瞬間にアクティブリストから履歴リストへ「移動」され、
//! 両方のリストに同時に存在することはない。

use std::collections::HashMap;

use serde::Serialize;

use super::value_object::{
    AlertId, Location, MapViewMode, Resolution, Severity, Timestamp, TrafficSimPatch, UserId,
};

/// 一件の緊急通報とそのライフサイクル状態
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// サーバー側で採番された一意な ID
    pub id: AlertId,
    /// 作成時刻
    pub created_at: Timestamp,
    /// 深刻度（外部分類器の結果、欠損時は Critical）
    pub status: Severity,
    /// 座標文字列（"lat, lon"）
    pub location: Location,
    /// 逆ジオコーディング結果（失敗・レート制限で欠損しうる）
    pub full_address: Option<String>,
    /// 通報クライアントの ID
    pub user_id: UserId,
    /// 音声認識の書き起こし
    pub transcript: Option<String>,
    /// 分類器の判断理由
    pub ai_reasoning: Option<String>,
    /// 添付映像データ
    pub video_data: Option<String>,
    /// 映像の解析結果
    pub video_analysis: Option<String>,
    /// オペレーターによる受理済みフラグ
    pub accepted: bool,
    /// 受理時刻
    pub accepted_at: Option<Timestamp>,
    /// アーカイブ済みフラグ
    pub resolved: bool,
    /// アーカイブ時刻
    pub resolved_at: Option<Timestamp>,
    /// アーカイブ時の処理区分
    pub resolution: Option<Resolution>,
}

/// 新規アラート作成時の任意項目（証拠フィールド）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertEvidence {
    pub full_address: Option<String>,
    pub transcript: Option<String>,
    pub ai_reasoning: Option<String>,
    pub video_data: Option<String>,
    pub video_analysis: Option<String>,
}

impl Alert {
    /// 新しい pending 状態のアラートを作成
    pub fn open(
        id: AlertId,
        created_at: Timestamp,
        status: Severity,
        location: Location,
        user_id: UserId,
        evidence: AlertEvidence,
    ) -> Self {
        Self {
            id,
            created_at,
            status,
            location,
            full_address: evidence.full_address,
            user_id,
            transcript: evidence.transcript,
            ai_reasoning: evidence.ai_reasoning,
            video_data: evidence.video_data,
            video_analysis: evidence.video_analysis,
            accepted: false,
            accepted_at: None,
            resolved: false,
            resolved_at: None,
            resolution: None,
        }
    }

    /// オペレーターによる受理
    ///
    /// アーカイブ済みのアラートには作用しない（戻り値 false）。
    pub fn accept(&mut self, at: Timestamp) -> bool {
        if self.resolved {
            return false;
        }
        self.accepted = true;
        self.accepted_at = Some(at);
        true
    }

    /// アーカイブ（対応完了 or 却下）
    ///
    /// 既にアーカイブ済みの場合は作用しない（戻り値 false）。
    pub fn archive(&mut self, at: Timestamp, resolution: Resolution) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.resolved_at = Some(at);
        self.resolution = Some(resolution);
        true
    }

    /// アーカイブ済みかどうか
    pub fn is_archived(&self) -> bool {
        self.resolved
    }
}

/// 通報クライアントの最終既知位置
///
/// userId をキーとした upsert 専用のレコード。明示的な削除・期限切れはない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveUser {
    pub location: Location,
    pub full_address: Option<String>,
    pub last_seen: Timestamp,
}

/// 災害モードフラグ（プロセス全体で共有）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisasterMode {
    pub active: bool,
    pub disaster_type: Option<String>,
    pub activated_at: Option<Timestamp>,
}

impl DisasterMode {
    /// 災害モードを有効化
    pub fn activate(&mut self, disaster_type: String, at: Timestamp) {
        self.active = true;
        self.disaster_type = Some(disaster_type);
        self.activated_at = Some(at);
    }

    /// 災害モードを解除
    pub fn deactivate(&mut self) {
        *self = Self::default();
    }
}

/// 交通シミュレーションフラグ（プロセス全体で共有）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficSimulation {
    pub active: bool,
    pub heavy_traffic: bool,
    pub road_closures: bool,
}

impl TrafficSimulation {
    /// 部分更新をマージ（`None` のフィールドは現在値を維持）
    pub fn merge(&mut self, patch: TrafficSimPatch) {
        if let Some(active) = patch.active {
            self.active = active;
        }
        if let Some(heavy_traffic) = patch.heavy_traffic {
            self.heavy_traffic = heavy_traffic;
        }
        if let Some(road_closures) = patch.road_closures {
            self.road_closures = road_closures;
        }
    }
}

/// アラートボード（集約ルート）
///
/// 共有状態の正本。ミューテーションは必ずこの集約のメソッドを経由する。
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertBoard {
    /// アクティブ（pending / accepted）なアラート
    pub alerts: Vec<Alert>,
    /// アーカイブ済み（resolved / rejected）のアラート
    pub history: Vec<Alert>,
    /// userId → 最終既知位置
    pub active_users: HashMap<String, ActiveUser>,
    /// 災害モードフラグ
    pub disaster_mode: DisasterMode,
    /// 交通シミュレーションフラグ
    pub traffic_simulation: TrafficSimulation,
    /// マップ表示モード
    pub map_view_mode: MapViewMode,
}

impl AlertBoard {
    /// 空のアラートボードを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 新規アラートをアクティブリストへ追加
    pub fn open_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// アクティブリスト内のアラートを受理する
    ///
    /// 存在しない ID の場合は何もしない（`None` を返す）。
    pub fn accept_alert(&mut self, id: &AlertId, at: Timestamp) -> Option<Alert> {
        let alert = self.alerts.iter_mut().find(|a| &a.id == id)?;
        if !alert.accept(at) {
            return None;
        }
        Some(alert.clone())
    }

    /// アクティブリスト内のアラートをアーカイブし、履歴へ移動する
    ///
    /// アクティブリストからの削除と履歴への追加は同一の `&mut self` 内で
    /// 行われるため、両方に存在する・どちらにも存在しない瞬間は観測されない。
    /// 存在しない ID の場合は何もしない（冪等）。
    pub fn archive_alert(
        &mut self,
        id: &AlertId,
        at: Timestamp,
        resolution: Resolution,
    ) -> Option<Alert> {
        let index = self.alerts.iter().position(|a| &a.id == id)?;
        let mut alert = self.alerts.remove(index);
        alert.archive(at, resolution);
        self.history.push(alert.clone());
        Some(alert)
    }

    /// 通報ユーザーの位置を upsert する
    ///
    /// 同じ userId のエントリは置き換えられ、重複は発生しない。
    /// あわせて、同じ userId を持つアクティブアラートの位置情報も更新する。
    pub fn update_user_location(
        &mut self,
        user_id: &UserId,
        location: Location,
        full_address: Option<String>,
        at: Timestamp,
    ) {
        self.active_users.insert(
            user_id.as_str().to_string(),
            ActiveUser {
                location: location.clone(),
                full_address: full_address.clone(),
                last_seen: at,
            },
        );

        for alert in self.alerts.iter_mut().filter(|a| &a.user_id == user_id) {
            alert.location = location.clone();
            alert.full_address = full_address.clone();
        }
    }

    /// 災害モードを有効化し、新しいフラグを返す
    pub fn activate_disaster(&mut self, disaster_type: String, at: Timestamp) -> DisasterMode {
        self.disaster_mode.activate(disaster_type, at);
        self.disaster_mode.clone()
    }

    /// 災害モードを解除
    pub fn deactivate_disaster(&mut self) {
        self.disaster_mode.deactivate();
    }

    /// 交通シミュレーションフラグをマージし、マージ後の値を返す
    pub fn merge_traffic_simulation(&mut self, patch: TrafficSimPatch) -> TrafficSimulation {
        self.traffic_simulation.merge(patch);
        self.traffic_simulation
    }

    /// マップ表示モードを設定
    pub fn set_map_view_mode(&mut self, mode: MapViewMode) -> MapViewMode {
        self.map_view_mode = mode;
        mode
    }

    /// 指定された ID のアラートがアクティブリストに存在するか
    pub fn contains_active(&self, id: &AlertId) -> bool {
        self.alerts.iter().any(|a| &a.id == id)
    }

    /// 指定された ID のアラートが履歴に存在するか
    pub fn contains_archived(&self, id: &AlertId) -> bool {
        self.history.iter().any(|a| &a.id == id)
    }
}
