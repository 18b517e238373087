//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::entity::Alert;

/// アラート一覧 API のサマリ表現
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummaryDto {
    pub id: String,
    pub status: String,
    pub location: String,
    pub user_id: String,
    pub created_at: String,
    pub accepted: bool,
    pub resolution_type: Option<String>,
}

impl From<Alert> for AlertSummaryDto {
    fn from(model: Alert) -> Self {
        Self {
            id: model.id.into_string(),
            status: model.status.to_string(),
            location: model.location.into_string(),
            user_id: model.user_id.into_string(),
            created_at: kinkyu_shared::time::to_jst_rfc3339(model.created_at.value()),
            accepted: model.accepted,
            resolution_type: model.resolution.map(|r| r.to_string()),
        }
    }
}
