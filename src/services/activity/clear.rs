use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::middlewares::RequireJWT;
use crate::models::activity::responses::ClearHistoryResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 清除动态历史
///
/// 只追加一条水位线，不删除任何提交；教员端列表不受影响。
pub async fn clear_history(
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

    match storage.clear_student_history(&current_user.name).await {
        Ok(cleared_at) => {
            tracing::info!("Activity history cleared for {}", current_user.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClearHistoryResponse { cleared_at },
                "Activity history cleared",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("清除动态历史失败: {e}"),
            )),
        ),
    }
}
