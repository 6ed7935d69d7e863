use super::entities::SubmissionStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 创建提交请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub title: String,
    pub course: Option<String>,
    pub assignment: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub completion_date: Option<chrono::NaiveDate>,
    pub organization_name: Option<String>,
    pub organization_email: Option<String>,
    /// true 时仅保存草稿，不进入评审队列
    #[serde(default)]
    pub save_as_draft: bool,
}

// 教员评审请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct ReviewSubmissionRequest {
    /// 目标状态，必须是 approved / rejected / revision 之一
    pub status: SubmissionStatus,
    pub feedback: Option<String>,
    pub grade: Option<String>,
    pub credit_hours: Option<String>,
}

// 提交查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<SubmissionStatus>,
    pub student: Option<String>,
    /// 按学生名或标题模糊匹配
    pub search: Option<String>,
}

// 提交列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<SubmissionStatus>,
    pub student: Option<String>,
    pub search: Option<String>,
}

// 评审字段更新（用于存储层）
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub status: SubmissionStatus,
    pub feedback: Option<String>,
    pub grade: Option<String>,
    pub credit_hours: Option<String>,
}
