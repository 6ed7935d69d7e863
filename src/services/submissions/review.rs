use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use super::SubmissionService;
use crate::errors::PortfolioError;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::{ReviewSubmissionRequest, ReviewUpdate};
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 教员评审：写入状态、评语、成绩与学分
///
/// 允许对已评审的提交再次评审（评审态之间直接流转）；
/// 唯一禁止的目标是还没提交的草稿。
pub async fn review_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: Uuid,
    review_request: ReviewSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if !review_request.status.is_review_state() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidStatusTransition,
            "评审结果必须是 approved、rejected 或 revision 之一",
        )));
    }

    let update = ReviewUpdate {
        status: review_request.status,
        feedback: review_request.feedback,
        grade: review_request.grade,
        credit_hours: review_request.credit_hours,
    };

    match storage.apply_review(submission_id, update).await {
        Ok(Some(submission)) => {
            tracing::info!(
                "Submission '{}' of {} reviewed as {} by {}",
                submission.title,
                submission.student_name,
                submission.status,
                current_user.username
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionResponse { submission },
                "Evaluation published",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e @ PortfolioError::InvalidTransition(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::InvalidStatusTransition, e.message()),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubmissionUpdateFailed,
                format!("评审失败: {e}"),
            )),
        ),
    }
}
