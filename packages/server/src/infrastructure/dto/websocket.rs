//! WebSocket ワイヤプロトコル定義
//!
//! 双方向とも、各フレームは `{ "type": "<NAME>", "payload": { … } }` 形式の
//! JSON テキストフレーム一つ。受信側は閉じたタグ付きユニオンとしてパースし、
//! ユニオン外のフレームはログに記録して破棄する（コネクションは維持）。
//!
//! ペイロードのフィールド名はワイヤ上では camelCase。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// クライアント → サーバーのメッセージ（閉じたタグ付きユニオン）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum InboundMessage {
    /// 新規アラートの通報
    #[serde(rename = "NEW_ALERT")]
    NewAlert(NewAlertPayload),
    /// オペレーターによる受理
    #[serde(rename = "ACCEPT_ALERT")]
    AcceptAlert(AlertRefPayload),
    /// 対応完了としてアーカイブ
    #[serde(rename = "RESOLVE_ALERT")]
    ResolveAlert(AlertRefPayload),
    /// 却下としてアーカイブ
    #[serde(rename = "REJECT_ALERT")]
    RejectAlert(AlertRefPayload),
    /// 通報ユーザーの位置更新
    #[serde(rename = "LOCATION_UPDATE")]
    LocationUpdate(LocationUpdatePayload),
    /// 災害モードの有効化
    #[serde(rename = "ACTIVATE_DISASTER")]
    ActivateDisaster(ActivateDisasterPayload),
    /// 災害モードの解除（payload は空オブジェクト）
    #[serde(rename = "DEACTIVATE_DISASTER")]
    DeactivateDisaster(EmptyPayload),
    /// 交通シミュレーションフラグの部分更新
    #[serde(rename = "UPDATE_TRAFFIC_SIM")]
    UpdateTrafficSim(TrafficSimPayload),
    /// マップ表示モードの変更
    #[serde(rename = "SET_MAP_VIEW_MODE")]
    SetMapViewMode(MapViewModePayload),
}

/// サーバー → クライアントのメッセージ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutboundMessage {
    /// 接続直後に送られる全状態スナップショット（対象コネクションのみ）
    #[serde(rename = "INIT_DATA")]
    InitData(InitDataPayload),
    /// アラートが作成された
    #[serde(rename = "ALERT_CREATED")]
    AlertCreated(AlertDto),
    /// アラートが更新された（受理）
    #[serde(rename = "ALERT_UPDATED")]
    AlertUpdated(AlertDto),
    /// アラートがアーカイブされた（対応完了 or 却下）
    #[serde(rename = "ALERT_RESOLVED")]
    AlertResolved(AlertResolvedPayload),
    /// 通報ユーザーの位置が更新された
    #[serde(rename = "USER_LOCATION_UPDATED")]
    UserLocationUpdated(UserLocationUpdatedPayload),
    /// 災害モードが有効化された
    #[serde(rename = "DISASTER_ACTIVATED")]
    DisasterActivated(DisasterModeDto),
    /// 災害モードが解除された
    #[serde(rename = "DISASTER_DEACTIVATED")]
    DisasterDeactivated(EmptyPayload),
    /// 交通シミュレーションフラグが更新された
    #[serde(rename = "TRAFFIC_SIM_UPDATED")]
    TrafficSimUpdated(TrafficSimDto),
    /// マップ表示モードが変更された
    #[serde(rename = "MAP_VIEW_MODE_UPDATED")]
    MapViewModeUpdated(MapViewModePayload),
}

/// 空ペイロード（`{}`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyPayload {}

/// NEW_ALERT のペイロード
///
/// `location` と `userId` のみ必須。深刻度（`urgency`）は外部分類器の結果で、
/// 欠損・未知の値はサーバー側で Critical に倒される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlertPayload {
    pub location: String,
    pub user_id: String,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub ai_reasoning: Option<String>,
    #[serde(default)]
    pub video_data: Option<String>,
    #[serde(default)]
    pub video_analysis: Option<String>,
}

/// 既存アラートを参照する操作のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRefPayload {
    pub id: String,
}

/// LOCATION_UPDATE のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdatePayload {
    pub user_id: String,
    pub location: String,
    #[serde(default)]
    pub full_address: Option<String>,
}

/// ACTIVATE_DISASTER のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivateDisasterPayload {
    #[serde(rename = "type")]
    pub disaster_type: String,
}

/// UPDATE_TRAFFIC_SIM のペイロード（部分更新）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSimPayload {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub heavy_traffic: Option<bool>,
    #[serde(default)]
    pub road_closures: Option<bool>,
}

/// SET_MAP_VIEW_MODE / MAP_VIEW_MODE_UPDATED のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewModePayload {
    pub mode: String,
}

/// アラートのワイヤ表現
///
/// タイムスタンプは全て RFC 3339 文字列。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDto {
    pub id: String,
    pub timestamp: String,
    pub status: String,
    pub location: String,
    pub full_address: Option<String>,
    pub user_id: String,
    pub transcript: Option<String>,
    pub ai_reasoning: Option<String>,
    pub video_data: Option<String>,
    pub video_analysis: Option<String>,
    pub accepted: bool,
    pub accepted_at: Option<String>,
    pub resolved: bool,
    pub resolved_at: Option<String>,
    pub resolution_type: Option<String>,
}

/// 通報ユーザーの最終既知位置のワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUserDto {
    pub location: String,
    pub full_address: Option<String>,
    pub last_seen: String,
}

/// 災害モードフラグのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterModeDto {
    pub active: bool,
    #[serde(rename = "type")]
    pub disaster_type: Option<String>,
    pub activated_at: Option<String>,
}

/// 交通シミュレーションフラグのワイヤ表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSimDto {
    pub active: bool,
    pub heavy_traffic: bool,
    pub road_closures: bool,
}

/// ALERT_RESOLVED のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertResolvedPayload {
    pub alert_id: String,
    pub resolved_alert: AlertDto,
}

/// USER_LOCATION_UPDATED のペイロード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLocationUpdatedPayload {
    pub user_id: String,
    pub location: String,
    pub full_address: Option<String>,
    pub active_users: HashMap<String, ActiveUserDto>,
}

/// INIT_DATA のペイロード（全状態スナップショット）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitDataPayload {
    pub alerts: Vec<AlertDto>,
    pub history: Vec<AlertDto>,
    pub active_users: HashMap<String, ActiveUserDto>,
    pub disaster_mode: DisasterModeDto,
    pub traffic_simulation: TrafficSimDto,
    pub map_view_mode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ワイヤプロトコルの JSON 形状（{type, payload} エンベロープと camelCase）
    // - 必須フィールド欠損・未知 type のパース失敗
    // - 任意フィールド欠損時のデフォルト
    //
    // 【なぜこのテストが必要か】
    // - ワイヤ形状はブラウザ UI との唯一の契約であり、
    //   フィールド名の変化は全クライアントを壊す
    //
    // 【どのようなシナリオをテストするか】
    // 1. 最小の NEW_ALERT のパース
    // 2. 任意フィールド付き NEW_ALERT のパース
    // 3. 未知 type・payload 欠損のエラー
    // 4. アウトバウンドのエンベロープ形状
    // ========================================

    #[test]
    fn test_parse_minimal_new_alert() {
        // テスト項目: 必須フィールドのみの NEW_ALERT がパースできる
        // given (前提条件):
        let json = r#"{"type":"NEW_ALERT","payload":{"location":"12.97, 77.59","userId":"U1"}}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            InboundMessage::NewAlert(payload) => {
                assert_eq!(payload.location, "12.97, 77.59");
                assert_eq!(payload.user_id, "U1");
                assert_eq!(payload.urgency, None);
                assert_eq!(payload.transcript, None);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_alert_with_evidence() {
        // テスト項目: 証拠フィールド付きの NEW_ALERT がパースできる
        // given (前提条件):
        let json = r#"{
            "type": "NEW_ALERT",
            "payload": {
                "location": "35.68, 139.76",
                "userId": "U2",
                "urgency": "Medium",
                "fullAddress": "Tokyo Station",
                "transcript": "help, there is a fire",
                "aiReasoning": "fire mentioned explicitly",
                "videoData": "base64...",
                "videoAnalysis": "smoke visible"
            }
        }"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            InboundMessage::NewAlert(payload) => {
                assert_eq!(payload.urgency.as_deref(), Some("Medium"));
                assert_eq!(payload.full_address.as_deref(), Some("Tokyo Station"));
                assert_eq!(payload.ai_reasoning.as_deref(), Some("fire mentioned explicitly"));
                assert_eq!(payload.video_analysis.as_deref(), Some("smoke visible"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        // テスト項目: ユニオン外の type はパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"SELF_DESTRUCT","payload":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_required_field_fails() {
        // テスト項目: 必須フィールド（location）欠損はパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"NEW_ALERT","payload":{"userId":"U1"}}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_deactivate_disaster_with_empty_payload() {
        // テスト項目: DEACTIVATE_DISASTER は空の payload でパースできる
        // given (前提条件):
        let json = r#"{"type":"DEACTIVATE_DISASTER","payload":{}}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(msg, InboundMessage::DeactivateDisaster(EmptyPayload {}));
    }

    #[test]
    fn test_parse_activate_disaster_type_field() {
        // テスト項目: ACTIVATE_DISASTER の "type" フィールドが disaster_type にマップされる
        // given (前提条件):
        let json = r#"{"type":"ACTIVATE_DISASTER","payload":{"type":"earthquake"}}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            InboundMessage::ActivateDisaster(payload) => {
                assert_eq!(payload.disaster_type, "earthquake");
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_parse_partial_traffic_sim_payload() {
        // テスト項目: UPDATE_TRAFFIC_SIM の部分ペイロードで欠損フィールドが None になる
        // given (前提条件):
        let json = r#"{"type":"UPDATE_TRAFFIC_SIM","payload":{"heavyTraffic":true}}"#;

        // when (操作):
        let msg: InboundMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            InboundMessage::UpdateTrafficSim(payload) => {
                assert_eq!(payload.active, None);
                assert_eq!(payload.heavy_traffic, Some(true));
                assert_eq!(payload.road_closures, None);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_outbound_envelope_shape() {
        // テスト項目: アウトバウンドが {type, payload} エンベロープで camelCase になる
        // given (前提条件):
        let msg = OutboundMessage::AlertResolved(AlertResolvedPayload {
            alert_id: "a-1".to_string(),
            resolved_alert: AlertDto {
                id: "a-1".to_string(),
                timestamp: "2023-01-01T00:00:00+09:00".to_string(),
                status: "Critical".to_string(),
                location: "12.97, 77.59".to_string(),
                full_address: None,
                user_id: "U1".to_string(),
                transcript: None,
                ai_reasoning: None,
                video_data: None,
                video_analysis: None,
                accepted: true,
                accepted_at: Some("2023-01-01T00:01:00+09:00".to_string()),
                resolved: true,
                resolved_at: Some("2023-01-01T00:02:00+09:00".to_string()),
                resolution_type: Some("Resolved".to_string()),
            },
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "ALERT_RESOLVED");
        assert_eq!(value["payload"]["alertId"], "a-1");
        assert_eq!(value["payload"]["resolvedAlert"]["userId"], "U1");
        assert_eq!(value["payload"]["resolvedAlert"]["resolutionType"], "Resolved");
        assert_eq!(value["payload"]["resolvedAlert"]["acceptedAt"], "2023-01-01T00:01:00+09:00");
    }

    #[test]
    fn test_init_data_envelope_shape() {
        // テスト項目: INIT_DATA が全コレクションとモードフラグを含む
        // given (前提条件):
        let mut active_users = HashMap::new();
        active_users.insert(
            "U1".to_string(),
            ActiveUserDto {
                location: "1, 1".to_string(),
                full_address: None,
                last_seen: "2023-01-01T00:00:00+09:00".to_string(),
            },
        );
        let msg = OutboundMessage::InitData(InitDataPayload {
            alerts: vec![],
            history: vec![],
            active_users,
            disaster_mode: DisasterModeDto {
                active: false,
                disaster_type: None,
                activated_at: None,
            },
            traffic_simulation: TrafficSimDto {
                active: false,
                heavy_traffic: false,
                road_closures: false,
            },
            map_view_mode: "standard".to_string(),
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "INIT_DATA");
        assert!(value["payload"]["alerts"].is_array());
        assert!(value["payload"]["history"].is_array());
        assert_eq!(value["payload"]["activeUsers"]["U1"]["location"], "1, 1");
        assert_eq!(value["payload"]["disasterMode"]["active"], false);
        assert_eq!(value["payload"]["trafficSimulation"]["heavyTraffic"], false);
        assert_eq!(value["payload"]["mapViewMode"], "standard");
    }

    #[test]
    fn test_inbound_roundtrip_for_alert_ref() {
        // テスト項目: ACCEPT_ALERT のシリアライズ結果が期待する形状になる
        // given (前提条件):
        let msg = InboundMessage::AcceptAlert(AlertRefPayload {
            id: "a-42".to_string(),
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "ACCEPT_ALERT");
        assert_eq!(value["payload"]["id"], "a-42");
    }
}
