use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeSubmissionId;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 创建提交
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, submission_id.0).await
}

// 草稿定稿
pub async fn submit_draft(
    req: HttpRequest,
    submission_id: SafeSubmissionId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.submit_draft(&req, submission_id.0).await
}

// 标记评审结果已读
pub async fn mark_viewed(
    req: HttpRequest,
    submission_id: SafeSubmissionId,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.mark_viewed(&req, submission_id.0).await
}

/// GPA 统计查询参数
#[derive(Debug, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GpaQuery {
    pub student: Option<String>,
}

// 学生 GPA / 学分统计
pub async fn get_gpa_summary(
    req: HttpRequest,
    query: web::Query<GpaQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_gpa_summary(&req, query.into_inner().student)
        .await
}

// 教员评审
pub async fn review_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionId,
    body: web::Json<ReviewSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .review_submission(&req, submission_id.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_submissions))
            .route("", web::post().to(create_submission))
            .route("/stats", web::get().to(get_gpa_summary))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}/submit", web::post().to(submit_draft))
            .route("/{id}/viewed", web::post().to(mark_viewed))
            // 评审端点仅教员/管理员可用
            .service(
                web::resource("/{id}/review")
                    .wrap(middlewares::RequireRole::new_any(UserRole::faculty_roles()))
                    .route(web::put().to(review_submission)),
            ),
    );
}
