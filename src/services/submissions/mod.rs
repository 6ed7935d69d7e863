pub mod create;
pub mod detail;
pub mod list;
pub mod review;
pub mod stats;
pub mod submit;
pub mod viewed;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 学生创建提交（草稿或直接进入评审队列）
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        create_request: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, create_request).await
    }

    /// 草稿定稿
    pub async fn submit_draft(
        &self,
        request: &HttpRequest,
        submission_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        submit::submit_draft(self, request, submission_id).await
    }

    /// 列出提交（学生只看到自己的）
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        params: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, params).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 教员评审
    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        submission_id: Uuid,
        review_request: ReviewSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_submission(self, request, submission_id, review_request).await
    }

    /// 学生标记评审结果已读
    pub async fn mark_viewed(
        &self,
        request: &HttpRequest,
        submission_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        viewed::mark_viewed(self, request, submission_id).await
    }

    /// 学生 GPA / 学分统计
    pub async fn get_gpa_summary(
        &self,
        request: &HttpRequest,
        student: Option<String>,
    ) -> ActixResult<HttpResponse> {
        stats::get_gpa_summary(self, request, student).await
    }
}
