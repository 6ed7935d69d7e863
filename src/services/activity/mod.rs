pub mod clear;
pub mod list;
pub mod unread;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 学生动态服务
///
/// 动态 = 评审结果对学生的可见性：已离开待评审状态、
/// 且晚于该学生清除水位线的提交。客户端周期性轮询这些端点，
/// 列表查询是纯读操作，可随意重入。
pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 动态列表
    pub async fn list_activity(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_activity(self, request).await
    }

    // 未读数量（通知角标）
    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        unread::unread_count(self, request).await
    }

    // 清除动态历史（追加水位线）
    pub async fn clear_history(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        clear::clear_history(self, request).await
    }
}
