use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// 提交状态
//
// 生命周期: DRAFT -> SUBMITTED -> {APPROVED, REJECTED, REVISION}。
// 已评审的提交允许教员再次评审并在三个评审态之间流转，
// 不需要显式的 reopen 步骤。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Draft,     // 草稿，仅学生可见可编辑
    Submitted, // 已提交，等待教员评审（历史上也写作 PENDING）
    Approved,  // 通过
    Rejected,  // 驳回
    Revision,  // 退回修改
}

impl SubmissionStatus {
    pub const DRAFT: &'static str = "DRAFT";
    pub const SUBMITTED: &'static str = "SUBMITTED";
    pub const APPROVED: &'static str = "APPROVED";
    pub const REJECTED: &'static str = "REJECTED";
    pub const REVISION: &'static str = "REVISION";

    /// 是否为教员评审结果状态
    pub fn is_review_state(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Approved | SubmissionStatus::Rejected | SubmissionStatus::Revision
        )
    }

    /// 是否在等待评审
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted)
    }

    /// 持久化文件中的状态字面量（大写，与历史文件格式一致）
    pub fn as_record_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => Self::DRAFT,
            SubmissionStatus::Submitted => Self::SUBMITTED,
            SubmissionStatus::Approved => Self::APPROVED,
            SubmissionStatus::Rejected => Self::REJECTED,
            SubmissionStatus::Revision => Self::REVISION,
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: draft, submitted, approved, rejected, revision"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_record_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // 旧版文件与客户端同时存在大小写两种写法，统一不区分大小写；
        // "PENDING" 是 SUBMITTED 的历史同义词
        match s.trim().to_uppercase().as_str() {
            Self::DRAFT => Ok(SubmissionStatus::Draft),
            Self::SUBMITTED | "PENDING" => Ok(SubmissionStatus::Submitted),
            Self::APPROVED => Ok(SubmissionStatus::Approved),
            Self::REJECTED => Ok(SubmissionStatus::Rejected),
            Self::REVISION => Ok(SubmissionStatus::Revision),
            other => Err(format!("Invalid submission status: {other}")),
        }
    }
}

// 提交实体
//
// id 是生成的代理键，所有定位更新都走它；(student_name, title)
// 只作为展示值，不再充当自然键。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: Uuid,
    pub student_name: String,
    pub title: String,
    pub course: String,
    pub assignment: String,
    pub category: String,
    pub description: String,
    // 学生在客户端选择的文件名，仅作展示
    pub file_name: String,
    pub completion_date: chrono::NaiveDate,
    pub status: SubmissionStatus,
    pub grade: Option<String>,
    pub feedback: Option<String>,
    // 学分以字符串形式录入，统计时再解析
    pub credit_hours: Option<String>,
    pub organization_name: String,
    pub organization_email: String,
    // 学生是否已查看最近一次评审结果，驱动通知角标
    pub viewed_by_student: bool,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 学生名是否匹配（去除首尾空白、不区分大小写）
    pub fn student_matches(&self, student_name: &str) -> bool {
        self.student_name.trim().eq_ignore_ascii_case(student_name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_submitted_alias() {
        let status: SubmissionStatus = "PENDING".parse().unwrap();
        assert_eq!(status, SubmissionStatus::Submitted);
        let status: SubmissionStatus = "pending".parse().unwrap();
        assert_eq!(status, SubmissionStatus::Submitted);
    }

    #[test]
    fn test_record_str_round_trip() {
        for status in [
            SubmissionStatus::Draft,
            SubmissionStatus::Submitted,
            SubmissionStatus::Approved,
            SubmissionStatus::Rejected,
            SubmissionStatus::Revision,
        ] {
            let parsed: SubmissionStatus = status.as_record_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_review_states() {
        assert!(SubmissionStatus::Approved.is_review_state());
        assert!(SubmissionStatus::Revision.is_review_state());
        assert!(!SubmissionStatus::Submitted.is_review_state());
        assert!(!SubmissionStatus::Draft.is_review_state());
    }
}
