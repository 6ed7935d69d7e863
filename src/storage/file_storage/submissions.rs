//! 提交记录操作
//!
//! 所有定位更新都按 UUID 查找；(student_name, title) 只是展示值。

use chrono::Utc;
use uuid::Uuid;

use super::FileStorage;
use crate::errors::{PortfolioError, Result};
use crate::models::common::PaginationInfo;
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::{CreateSubmissionRequest, ReviewUpdate, SubmissionListQuery},
    responses::SubmissionListResponse,
};

impl FileStorage {
    pub(crate) async fn create_submission_impl(
        &self,
        student_name: &str,
        request: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let mut state = self.state.write().await;

        let status = if request.save_as_draft {
            SubmissionStatus::Draft
        } else {
            SubmissionStatus::Submitted
        };

        let submission = Submission {
            id: Uuid::new_v4(),
            student_name: student_name.trim().to_string(),
            title: request.title.trim().to_string(),
            course: request.course.unwrap_or_else(|| "General".to_string()),
            assignment: request.assignment.unwrap_or_else(|| "Project".to_string()),
            category: request.category.unwrap_or_else(|| "Academic".to_string()),
            description: request.description.unwrap_or_default(),
            file_name: request.file_name.unwrap_or_else(|| "No file".to_string()),
            completion_date: request
                .completion_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            status,
            grade: None,
            feedback: None,
            credit_hours: None,
            organization_name: request.organization_name.unwrap_or_default(),
            organization_email: request.organization_email.unwrap_or_default(),
            viewed_by_student: false,
            last_updated: Utc::now(),
        };
        state.submissions.push(submission.clone());

        self.persist_submissions(&state);
        Ok(submission)
    }

    pub(crate) async fn get_submission_by_id_impl(&self, id: Uuid) -> Result<Option<Submission>> {
        let state = self.state.read().await;
        Ok(state.submissions.iter().find(|s| s.id == id).cloned())
    }

    pub(crate) async fn list_submissions_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let state = self.state.read().await;

        let search = query.search.as_deref().map(str::to_lowercase);
        let filtered: Vec<&Submission> = state
            .submissions
            .iter()
            .filter(|s| {
                if let Some(status) = query.status
                    && s.status != status
                {
                    return false;
                }
                if let Some(student) = query.student.as_deref()
                    && !s.student_matches(student)
                {
                    return false;
                }
                if let Some(needle) = search.as_deref()
                    && !needle.is_empty()
                    && !s.student_name.to_lowercase().contains(needle)
                    && !s.title.to_lowercase().contains(needle)
                {
                    return false;
                }
                true
            })
            .collect();

        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(10).max(1);
        let total = filtered.len() as i64;
        let start = ((page - 1) * size) as usize;

        let items = filtered
            .into_iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub(crate) async fn list_student_submissions_impl(
        &self,
        student_name: &str,
    ) -> Result<Vec<Submission>> {
        let state = self.state.read().await;
        Ok(state
            .submissions
            .iter()
            .filter(|s| s.student_matches(student_name))
            .cloned()
            .collect())
    }

    pub(crate) async fn submit_draft_impl(&self, id: Uuid) -> Result<Option<Submission>> {
        let mut state = self.state.write().await;

        let Some(submission) = state.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if submission.status != SubmissionStatus::Draft {
            return Err(PortfolioError::invalid_transition(format!(
                "只有草稿可以定稿，当前状态: {}",
                submission.status
            )));
        }

        submission.status = SubmissionStatus::Submitted;
        submission.last_updated = Utc::now();
        let updated = submission.clone();

        self.persist_submissions(&state);
        Ok(Some(updated))
    }

    pub(crate) async fn apply_review_impl(
        &self,
        id: Uuid,
        update: ReviewUpdate,
    ) -> Result<Option<Submission>> {
        let mut state = self.state.write().await;

        let Some(submission) = state.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        // 草稿还没进评审队列；已评审的允许直接再评（不需要 reopen）
        if submission.status == SubmissionStatus::Draft {
            return Err(PortfolioError::invalid_transition(
                "草稿尚未提交，不能评审".to_string(),
            ));
        }

        submission.status = update.status;
        submission.feedback = update.feedback;
        submission.grade = update.grade.map(|g| g.to_uppercase());
        submission.credit_hours = update.credit_hours;
        submission.last_updated = Utc::now();
        // 任何评审都重置已读标记，重新点亮学生侧角标
        submission.viewed_by_student = false;
        let updated = submission.clone();

        self.persist_submissions(&state);
        Ok(Some(updated))
    }

    pub(crate) async fn mark_submission_viewed_impl(&self, id: Uuid) -> Result<Option<Submission>> {
        let mut state = self.state.write().await;

        let Some(submission) = state.submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        submission.viewed_by_student = true;
        let updated = submission.clone();

        self.persist_submissions(&state);
        Ok(Some(updated))
    }
}
