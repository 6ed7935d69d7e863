use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ActivityService;

// 懒加载的全局 ActivityService 实例
static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);

// 动态列表（客户端周期性轮询）
pub async fn list_activity(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.list_activity(&request).await
}

// 未读数量（通知角标）
pub async fn unread_count(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.unread_count(&request).await
}

// 清除动态历史
pub async fn clear_history(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE.clear_history(&request).await
}

// 配置路由（动态是学生侧功能）
pub fn configure_activity_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/activity")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Student))
                    .route("", web::get().to(list_activity))
                    .route("/unread-count", web::get().to(unread_count))
                    .route("/clear", web::post().to(clear_history)),
            ),
    );
}
