use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::GpaSummaryResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::grade::compute_gpa;

/// 学生 GPA / 学分统计
///
/// 只统计已通过的提交；按学分加权，学分非数字的条目跳过。
pub async fn get_gpa_summary(
    service: &SubmissionService,
    request: &HttpRequest,
    student: Option<String>,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 学生只能统计自己；教员/管理员可指定任意学生
    let student_name = match current_user.role {
        UserRole::Student => current_user.name.clone(),
        _ => match student {
            Some(name) => name,
            None => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Query parameter 'student' is required",
                )));
            }
        },
    };

    match storage.list_student_submissions(&student_name).await {
        Ok(submissions) => {
            let approved: Vec<(String, String)> = submissions
                .iter()
                .filter(|s| s.status == SubmissionStatus::Approved)
                .map(|s| {
                    (
                        s.grade.clone().unwrap_or_default(),
                        s.credit_hours.clone().unwrap_or_default(),
                    )
                })
                .collect();

            let approved_count = approved.len() as i64;
            let (gpa, total_credit_hours) =
                compute_gpa(approved.iter().map(|(g, c)| (g.as_str(), c.as_str())));

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GpaSummaryResponse {
                    student_name,
                    gpa,
                    total_credit_hours,
                    approved_count,
                },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("统计失败: {e}"),
            )),
        ),
    }
}
