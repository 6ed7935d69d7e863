use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_organization_email;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    create_request: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 提交由学生发起
    if current_user.role != UserRole::Student {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only students can create submissions",
        )));
    }

    if create_request.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Please enter a project title",
        )));
    }

    // 进入评审队列前必须有合法的机构邮箱；草稿可以先缺着
    if !create_request.save_as_draft {
        let organization_email = create_request.organization_email.as_deref().unwrap_or("");
        if let Err(msg) = validate_organization_email(organization_email) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::InvalidOrganizationEmail,
                msg,
            )));
        }
    }

    match storage
        .create_submission(&current_user.name, create_request)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Submission '{}' created by {} with status {}",
                submission.title,
                submission.student_name,
                submission.status
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                SubmissionResponse { submission },
                "Submission created",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::SubmissionCreateFailed,
                format!("创建提交失败: {e}"),
            )),
        ),
    }
}
