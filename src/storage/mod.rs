use std::sync::Arc;

use uuid::Uuid;

use crate::models::{
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, ReviewUpdate, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    system::responses::SystemStatsResponse,
    users::{
        entities::{User, UserRole, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod file_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段必须已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息（不区分大小写）
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 导出用户目录（不分页）
    async fn list_users_for_export(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
    ) -> Result<Vec<User>>;
    // 更新用户信息（password 字段必须已是哈希）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<i64>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 提交管理方法
    // 创建提交（由存储层分配 UUID 与时间戳）
    async fn create_submission(
        &self,
        student_name: &str,
        request: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过 UUID 获取提交
    async fn get_submission_by_id(&self, id: Uuid) -> Result<Option<Submission>>;
    // 列出提交（教员/管理员视角，可按状态、学生、关键字过滤）
    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<SubmissionListResponse>;
    // 某学生的全部提交（学生自己的作品集视图，含草稿）
    async fn list_student_submissions(&self, student_name: &str) -> Result<Vec<Submission>>;
    // 草稿定稿进入评审队列；目标不是草稿时报 InvalidTransition
    async fn submit_draft(&self, id: Uuid) -> Result<Option<Submission>>;
    // 写入评审结果；目标是草稿时报 InvalidTransition
    async fn apply_review(&self, id: Uuid, update: ReviewUpdate) -> Result<Option<Submission>>;
    // 学生标记已查看评审结果
    async fn mark_submission_viewed(&self, id: Uuid) -> Result<Option<Submission>>;

    /// 学生动态方法
    // 水位线之后、已离开待评审状态的提交，按插入顺序
    async fn list_student_activity(&self, student_name: &str) -> Result<Vec<Submission>>;
    // 未读动态数量（通知角标）
    async fn count_unread_activity(&self, student_name: &str) -> Result<i64>;
    // 追加一条清除水位线，返回其时间
    async fn clear_student_history(
        &self,
        student_name: &str,
    ) -> Result<chrono::DateTime<chrono::Utc>>;

    /// 系统统计方法
    async fn collect_system_stats(&self) -> Result<SystemStatsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = file_storage::FileStorage::new_async().await?;
    Ok(Arc::new(storage))
}
