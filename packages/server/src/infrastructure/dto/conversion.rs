//! Conversion logic between DTOs and domain entities.

use std::collections::HashMap;

use kinkyu_shared::time::to_jst_rfc3339;

use crate::domain::{entity, value_object::Timestamp};
use crate::infrastructure::dto::websocket as dto;

fn format_timestamp(timestamp: Timestamp) -> String {
    to_jst_rfc3339(timestamp.value())
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::Alert> for dto::AlertDto {
    fn from(model: entity::Alert) -> Self {
        Self {
            id: model.id.into_string(),
            timestamp: format_timestamp(model.created_at),
            status: model.status.to_string(),
            location: model.location.into_string(),
            full_address: model.full_address,
            user_id: model.user_id.into_string(),
            transcript: model.transcript,
            ai_reasoning: model.ai_reasoning,
            video_data: model.video_data,
            video_analysis: model.video_analysis,
            accepted: model.accepted,
            accepted_at: model.accepted_at.map(format_timestamp),
            resolved: model.resolved,
            resolved_at: model.resolved_at.map(format_timestamp),
            resolution_type: model.resolution.map(|r| r.to_string()),
        }
    }
}

impl From<entity::ActiveUser> for dto::ActiveUserDto {
    fn from(model: entity::ActiveUser) -> Self {
        Self {
            location: model.location.into_string(),
            full_address: model.full_address,
            last_seen: format_timestamp(model.last_seen),
        }
    }
}

impl From<entity::DisasterMode> for dto::DisasterModeDto {
    fn from(model: entity::DisasterMode) -> Self {
        Self {
            active: model.active,
            disaster_type: model.disaster_type,
            activated_at: model.activated_at.map(format_timestamp),
        }
    }
}

impl From<entity::TrafficSimulation> for dto::TrafficSimDto {
    fn from(model: entity::TrafficSimulation) -> Self {
        Self {
            active: model.active,
            heavy_traffic: model.heavy_traffic,
            road_closures: model.road_closures,
        }
    }
}

impl From<entity::AlertBoard> for dto::InitDataPayload {
    fn from(model: entity::AlertBoard) -> Self {
        Self {
            alerts: model.alerts.into_iter().map(Into::into).collect(),
            history: model.history.into_iter().map(Into::into).collect(),
            active_users: convert_active_users(model.active_users),
            disaster_mode: model.disaster_mode.into(),
            traffic_simulation: model.traffic_simulation.into(),
            map_view_mode: model.map_view_mode.to_string(),
        }
    }
}

/// ユーザー位置マップを DTO マップに変換
pub fn convert_active_users(
    users: HashMap<String, entity::ActiveUser>,
) -> HashMap<String, dto::ActiveUserDto> {
    users.into_iter().map(|(k, v)| (k, v.into())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::AlertEvidence;
    use crate::domain::value_object::{
        AlertId, Location, MapViewMode, Resolution, Severity, UserId,
    };

    fn test_alert() -> entity::Alert {
        entity::Alert::open(
            AlertId::new("a-1".to_string()).unwrap(),
            Timestamp::new(1672498800000), // 2023-01-01 00:00:00 JST
            Severity::Medium,
            Location::new("12.97, 77.59".to_string()).unwrap(),
            UserId::new("U1".to_string()).unwrap(),
            AlertEvidence {
                transcript: Some("help".to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_pending_alert_to_dto() {
        // テスト項目: pending アラートが DTO に変換される
        // given (前提条件):
        let alert = test_alert();

        // when (操作):
        let dto: dto::AlertDto = alert.into();

        // then (期待する結果):
        assert_eq!(dto.id, "a-1");
        assert_eq!(dto.status, "Medium");
        assert_eq!(dto.user_id, "U1");
        assert_eq!(dto.transcript.as_deref(), Some("help"));
        assert!(dto.timestamp.starts_with("2023-01-01T00:00:00"));
        assert!(!dto.accepted);
        assert_eq!(dto.accepted_at, None);
        assert_eq!(dto.resolution_type, None);
    }

    #[test]
    fn test_archived_alert_to_dto() {
        // テスト項目: アーカイブ済みアラートの処理区分とタイムスタンプが変換される
        // given (前提条件):
        let mut alert = test_alert();
        alert.accept(Timestamp::new(1672498860000));
        alert.archive(Timestamp::new(1672498920000), Resolution::Rejected);

        // when (操作):
        let dto: dto::AlertDto = alert.into();

        // then (期待する結果):
        assert!(dto.accepted);
        assert!(dto.resolved);
        assert_eq!(dto.resolution_type.as_deref(), Some("Rejected"));
        assert!(dto.accepted_at.unwrap().starts_with("2023-01-01T00:01:00"));
        assert!(dto.resolved_at.unwrap().starts_with("2023-01-01T00:02:00"));
    }

    #[test]
    fn test_board_to_init_data() {
        // テスト項目: AlertBoard が INIT_DATA ペイロードに変換される
        // given (前提条件):
        let mut board = entity::AlertBoard::new();
        board.open_alert(test_alert());
        board.update_user_location(
            &UserId::new("U1".to_string()).unwrap(),
            Location::new("1, 1".to_string()).unwrap(),
            None,
            Timestamp::new(1672498800000),
        );
        board.set_map_view_mode(MapViewMode::Heatmap);

        // when (操作):
        let payload: dto::InitDataPayload = board.into();

        // then (期待する結果):
        assert_eq!(payload.alerts.len(), 1);
        assert_eq!(payload.history.len(), 0);
        assert!(payload.active_users.contains_key("U1"));
        assert_eq!(payload.map_view_mode, "heatmap");
        assert!(!payload.disaster_mode.active);
    }
}
