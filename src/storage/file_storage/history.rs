//! 学生动态与清除水位线
//!
//! 水位线日志仅追加，同一学生可有多条记录，生效的是时间最大的一条。
//! 动态列表 = 该学生名下、状态已离开待评审、且晚于水位线的提交。

use chrono::{DateTime, Utc};

use super::{FileStorage, StoreState};
use crate::errors::Result;
use crate::models::submissions::entities::{Submission, SubmissionStatus};

fn names_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// 某学生的生效水位线（最大时间戳）
fn effective_watermark(state: &StoreState, student_name: &str) -> Option<DateTime<Utc>> {
    state
        .watermarks
        .iter()
        .filter(|(name, _)| names_match(name, student_name))
        .map(|(_, at)| *at)
        .max()
}

fn activity_items<'a>(
    state: &'a StoreState,
    student_name: &'a str,
) -> impl Iterator<Item = &'a Submission> {
    let watermark = effective_watermark(state, student_name);
    state.submissions.iter().filter(move |s| {
        if !s.student_matches(student_name) {
            return false;
        }
        // 草稿与待评审的提交都还没有可通知的结果
        if matches!(s.status, SubmissionStatus::Draft | SubmissionStatus::Submitted) {
            return false;
        }
        match watermark {
            Some(watermark) => s.last_updated > watermark,
            None => true,
        }
    })
}

impl FileStorage {
    pub(crate) async fn list_student_activity_impl(
        &self,
        student_name: &str,
    ) -> Result<Vec<Submission>> {
        let state = self.state.read().await;
        Ok(activity_items(&state, student_name).cloned().collect())
    }

    pub(crate) async fn count_unread_activity_impl(&self, student_name: &str) -> Result<i64> {
        let state = self.state.read().await;
        Ok(activity_items(&state, student_name)
            .filter(|s| !s.viewed_by_student)
            .count() as i64)
    }

    pub(crate) async fn clear_student_history_impl(
        &self,
        student_name: &str,
    ) -> Result<DateTime<Utc>> {
        let mut state = self.state.write().await;

        let at = Utc::now();
        state
            .watermarks
            .push((student_name.trim().to_string(), at));
        self.append_watermark_line(student_name, at);

        Ok(at)
    }

    pub(crate) async fn collect_system_stats_impl(
        &self,
    ) -> Result<crate::models::system::responses::SystemStatsResponse> {
        use crate::models::users::entities::{UserRole, UserStatus};

        let state = self.state.read().await;

        let count_role = |role: UserRole| -> i64 {
            state.users.iter().filter(|u| u.role == role).count() as i64
        };

        Ok(crate::models::system::responses::SystemStatsResponse {
            total_users: state.users.len() as i64,
            total_students: count_role(UserRole::Student),
            total_faculty: count_role(UserRole::Faculty),
            total_admins: count_role(UserRole::Admin),
            pending_accounts: state
                .users
                .iter()
                .filter(|u| u.status == UserStatus::Pending)
                .count() as i64,
            pending_submissions: state
                .submissions
                .iter()
                .filter(|s| s.status.is_pending())
                .count() as i64,
        })
    }
}
