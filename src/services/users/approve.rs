use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::entities::UserStatus;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 审核通过待审核账号（Pending -> Active）
///
/// 这是账号审核，与教员对提交的评审无关。
pub async fn approve_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let target = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    };

    if target.status != UserStatus::Pending {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserNotPending,
            "Account is not pending approval",
        )));
    }

    let update = UpdateUserRequest {
        name: None,
        email: None,
        password: None,
        role: None,
        status: Some(UserStatus::Active),
    };

    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => {
            tracing::info!("Account {} approved", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Account approved")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Account approval failed: {e}"),
            )),
        ),
    }
}
