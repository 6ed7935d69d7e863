use serde::Serialize;
use ts_rs::TS;

/// 管理端仪表盘统计响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatsResponse {
    pub total_users: i64,
    pub total_students: i64,
    pub total_faculty: i64,
    pub total_admins: i64,
    pub pending_accounts: i64,
    pub pending_submissions: i64,
}
