use serde::Serialize;
use ts_rs::TS;

use crate::models::submissions::entities::Submission;

/// 学生动态列表响应
///
/// 仅包含评审水位线之后、状态已离开待评审的提交，按插入顺序排列。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ActivityListResponse {
    pub items: Vec<Submission>,
}

/// 未读动态数量响应（通知角标）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

/// 清除动态历史响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct ClearHistoryResponse {
    pub cleared_at: chrono::DateTime<chrono::Utc>,
}
