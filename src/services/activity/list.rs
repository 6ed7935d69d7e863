use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activity::responses::ActivityListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_activity(
    service: &ActivityService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.list_student_activity(&current_user.name).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ActivityListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询动态失败: {e}"),
            )),
        ),
    }
}
