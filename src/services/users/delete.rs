use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// 标准删除路径不允许删除管理员账号
pub(crate) fn can_delete(target: &User) -> bool {
    target.role != UserRole::Admin
}

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 先取目标账号做角色检查
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
                    ErrorCode::UserDeleteFailed,
                    format!("User deletion failed: {e}"),
                )),
            );
        }
    };

    if !can_delete(&target) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteAdmin,
            "Admin accounts cannot be deleted",
        )));
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            tracing::info!("User {} ({}) deleted", target.username, target.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserDeleteFailed,
                format!("User deletion failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserStatus;

    fn user_with_role(role: UserRole) -> User {
        User {
            id: 1,
            name: "Someone".to_string(),
            username: "someone".to_string(),
            email: "someone@amazi.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            status: UserStatus::Active,
            created_at: chrono::Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_admin_accounts_are_not_deletable() {
        assert!(!can_delete(&user_with_role(UserRole::Admin)));
    }

    #[test]
    fn test_non_admin_accounts_are_deletable() {
        assert!(can_delete(&user_with_role(UserRole::Student)));
        assert!(can_delete(&user_with_role(UserRole::Faculty)));
    }
}
