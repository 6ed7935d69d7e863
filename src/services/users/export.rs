//! 用户目录导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::entities::User;
use crate::models::users::requests::UserExportParams;
use crate::models::{ApiResponse, ErrorCode};

/// 导出用户目录为 CSV
pub async fn export_users(
    service: &UserService,
    params: UserExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let users = match storage
        .list_users_for_export(params.role, params.status, params.search.as_deref())
        .await
    {
        Ok(users) => users,
        Err(e) => {
            error!("导出用户失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("导出用户失败: {e}"),
                )),
            );
        }
    };

    export_csv(&users)
}

fn export_csv(users: &[User]) -> ActixResult<HttpResponse> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // 写入表头
    wtr.write_record(["id", "name", "email", "role", "status", "created_at"])
        .map_err(|e| {
            error!("CSV 写入失败: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV 写入失败: {e}"))
        })?;

    // 写入数据
    for user in users {
        wtr.write_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.role.to_string(),
            user.status.to_string(),
            user.created_at.to_rfc3339(),
        ])
        .map_err(|e| {
            error!("CSV 写入失败: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV 写入失败: {e}"))
        })?;
    }

    let data = wtr.into_inner().map_err(|e| {
        error!("CSV 写入失败: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV 写入失败: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"user_directory.csv\"",
        ))
        .body(data))
}
