//! 平面文件存储实现
//!
//! 三个管道分隔文本文件（用户、提交、清除水位线）在启动时全量读入内存，
//! 每次变更对相应文件整体重写（水位线文件例外，仅追加）。这是刻意保留的
//! 简化持久化方案：进程内所有读写经由同一把 RwLock 串行化，跨进程并发
//! 写入仍是后写覆盖。落盘失败只记日志不报错，内存态继续服务。

mod codec;
mod history;
mod submissions;
mod users;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{PortfolioError, Result};
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
use crate::storage::Storage;

/// 三个数据文件的位置
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub users: PathBuf,
    pub submissions: PathBuf,
    pub history: PathBuf,
}

impl StorePaths {
    fn from_config(config: &AppConfig) -> Self {
        Self {
            users: config.users_file_path(),
            submissions: config.submissions_file_path(),
            history: config.history_file_path(),
        }
    }
}

/// 内存态：整个数据集
pub(crate) struct StoreState {
    pub users: Vec<User>,
    pub next_user_id: i64,
    pub submissions: Vec<Submission>,
    pub watermarks: Vec<(String, DateTime<Utc>)>,
}

/// 平面文件存储
pub struct FileStorage {
    paths: StorePaths,
    state: RwLock<StoreState>,
}

impl FileStorage {
    /// 从全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let storage = Self::open(StorePaths::from_config(config))?;
        Ok(storage)
    }

    /// 打开指定位置的数据文件并载入内存
    pub fn open(paths: StorePaths) -> Result<Self> {
        if let Some(dir) = paths.users.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| {
                PortfolioError::store_load(format!("无法创建数据目录 {}: {e}", dir.display()))
            })?;
        }

        let users = Self::load_lines(&paths.users, codec::decode_user, "user");
        let submissions = Self::load_lines(&paths.submissions, codec::decode_submission, "submission");
        let watermarks = Self::load_lines(&paths.history, codec::decode_watermark, "watermark");

        let next_user_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        info!(
            "File store loaded: {} user(s), {} submission(s), {} watermark(s) from {}",
            users.len(),
            submissions.len(),
            watermarks.len(),
            paths.users.parent().unwrap_or_else(|| paths.users.as_path()).display(),
        );

        Ok(Self {
            paths,
            state: RwLock::new(StoreState {
                users,
                next_user_id,
                submissions,
                watermarks,
            }),
        })
    }

    /// 逐行解码一个数据文件；文件不存在视为空，坏行跳过并告警
    fn load_lines<T>(
        path: &PathBuf,
        decode: impl Fn(&str) -> Option<T>,
        record_kind: &str,
    ) -> Vec<T> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                error!("Failed to read {}: {e}", path.display());
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode(line) {
                Some(record) => records.push(record),
                None => warn!(
                    "Skipping malformed {} record at {}:{}",
                    record_kind,
                    path.display(),
                    line_no + 1
                ),
            }
        }
        records
    }

    /// 整文件重写；失败只记日志（降级为仅内存服务）
    fn rewrite_file(path: &PathBuf, lines: impl Iterator<Item = String>) {
        let mut content: String = lines.collect::<Vec<_>>().join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        if let Err(e) = std::fs::write(path, content) {
            error!("Failed to persist {}: {e}", path.display());
        }
    }

    pub(crate) fn persist_users(&self, state: &StoreState) {
        Self::rewrite_file(&self.paths.users, state.users.iter().map(codec::encode_user));
    }

    pub(crate) fn persist_submissions(&self, state: &StoreState) {
        Self::rewrite_file(
            &self.paths.submissions,
            state.submissions.iter().map(codec::encode_submission),
        );
    }

    /// 水位线文件仅追加，不重写
    pub(crate) fn append_watermark_line(&self, student_name: &str, at: DateTime<Utc>) {
        use std::io::Write;

        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.paths.history)
            .and_then(|mut file| writeln!(file, "{}", codec::encode_watermark(student_name, at)));
        if let Err(e) = result {
            error!("Failed to append watermark to {}: {e}", self.paths.history.display());
        }
    }
}

// Storage trait 实现
#[async_trait::async_trait]
impl Storage for FileStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn list_users_for_export(
        &self,
        role: Option<UserRole>,
        status: Option<UserStatus>,
        search: Option<&str>,
    ) -> Result<Vec<User>> {
        self.list_users_for_export_impl(role, status, search).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<i64> {
        self.count_users_impl().await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 提交模块
    async fn create_submission(
        &self,
        student_name: &str,
        request: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.create_submission_impl(student_name, request).await
    }

    async fn get_submission_by_id(&self, id: Uuid) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions(&self, query: SubmissionListQuery) -> Result<SubmissionListResponse> {
        self.list_submissions_impl(query).await
    }

    async fn list_student_submissions(&self, student_name: &str) -> Result<Vec<Submission>> {
        self.list_student_submissions_impl(student_name).await
    }

    async fn submit_draft(&self, id: Uuid) -> Result<Option<Submission>> {
        self.submit_draft_impl(id).await
    }

    async fn apply_review(&self, id: Uuid, update: ReviewUpdate) -> Result<Option<Submission>> {
        self.apply_review_impl(id, update).await
    }

    async fn mark_submission_viewed(&self, id: Uuid) -> Result<Option<Submission>> {
        self.mark_submission_viewed_impl(id).await
    }

    // 学生动态模块
    async fn list_student_activity(&self, student_name: &str) -> Result<Vec<Submission>> {
        self.list_student_activity_impl(student_name).await
    }

    async fn count_unread_activity(&self, student_name: &str) -> Result<i64> {
        self.count_unread_activity_impl(student_name).await
    }

    async fn clear_student_history(
        &self,
        student_name: &str,
    ) -> Result<DateTime<Utc>> {
        self.clear_student_history_impl(student_name).await
    }

    // 系统统计模块
    async fn collect_system_stats(&self) -> Result<SystemStatsResponse> {
        self.collect_system_stats_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submissions::entities::SubmissionStatus;

    fn temp_storage() -> (tempfile::TempDir, FileStorage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths {
            users: dir.path().join("users.txt"),
            submissions: dir.path().join("submissions.txt"),
            history: dir.path().join("history_config.txt"),
        };
        let storage = FileStorage::open(paths).expect("open store");
        (dir, storage)
    }

    fn user_request(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            name: format!("{username} name"),
            username: username.to_string(),
            email: format!("{username}@amazi.com"),
            password: "$argon2id$v=19$m=19456,t=2,p=1$salt$hash".to_string(),
            role,
            status: None,
        }
    }

    fn submission_request(title: &str) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            title: title.to_string(),
            course: Some("Computer Science".to_string()),
            assignment: None,
            category: None,
            description: Some("desc".to_string()),
            file_name: None,
            completion_date: None,
            organization_name: Some("Acme".to_string()),
            organization_email: Some("hr@acme.org".to_string()),
            save_as_draft: false,
        }
    }

    fn review(status: SubmissionStatus, grade: &str, credits: &str) -> ReviewUpdate {
        ReviewUpdate {
            status,
            feedback: Some("feedback".to_string()),
            grade: Some(grade.to_string()),
            credit_hours: Some(credits.to_string()),
        }
    }

    #[tokio::test]
    async fn test_user_ids_are_monotonic() {
        let (_dir, storage) = temp_storage();
        let a = storage.create_user(user_request("alice", UserRole::Student)).await.unwrap();
        let b = storage.create_user(user_request("bob", UserRole::Faculty)).await.unwrap();
        assert_eq!(a.id + 1, b.id);
    }

    #[tokio::test]
    async fn test_lookup_by_username_or_email_is_case_insensitive() {
        let (_dir, storage) = temp_storage();
        storage.create_user(user_request("alice", UserRole::Student)).await.unwrap();
        let by_name = storage.get_user_by_username_or_email("ALICE").await.unwrap();
        assert!(by_name.is_some());
        let by_email = storage
            .get_user_by_username_or_email("Alice@Amazi.com")
            .await
            .unwrap();
        assert!(by_email.is_some());
        assert!(
            storage
                .get_user_by_username_or_email("nobody")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_record() {
        let (_dir, storage) = temp_storage();
        let a = storage.create_user(user_request("alice", UserRole::Student)).await.unwrap();
        storage.create_user(user_request("bob", UserRole::Student)).await.unwrap();

        assert!(storage.delete_user(a.id).await.unwrap());
        assert_eq!(storage.count_users().await.unwrap(), 1);
        // 再删同一 id 应该不命中
        assert!(!storage.delete_user(a.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_pending_submission_hidden_from_activity_until_reviewed() {
        let (_dir, storage) = temp_storage();
        let created = storage
            .create_submission("Abay Shimelis", submission_request("Capstone"))
            .await
            .unwrap();
        assert_eq!(created.status, SubmissionStatus::Submitted);

        // 待评审的提交不在学生动态里
        let activity = storage.list_student_activity("abay shimelis").await.unwrap();
        assert!(activity.is_empty());

        storage
            .apply_review(created.id, review(SubmissionStatus::Approved, "A", "3"))
            .await
            .unwrap()
            .expect("submission exists");

        let activity = storage.list_student_activity(" Abay Shimelis ").await.unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].status, SubmissionStatus::Approved);
        assert_eq!(activity[0].grade.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_review_resets_viewed_flag() {
        let (_dir, storage) = temp_storage();
        let created = storage
            .create_submission("Abay Shimelis", submission_request("Capstone"))
            .await
            .unwrap();
        storage
            .apply_review(created.id, review(SubmissionStatus::Revision, "N/A", ""))
            .await
            .unwrap();
        storage.mark_submission_viewed(created.id).await.unwrap();

        // 再次评审要重新点亮通知角标
        let reviewed = storage
            .apply_review(created.id, review(SubmissionStatus::Approved, "A", "3"))
            .await
            .unwrap()
            .unwrap();
        assert!(!reviewed.viewed_by_student);
        assert_eq!(storage.count_unread_activity("Abay Shimelis").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_draft_cannot_be_reviewed_and_submit_is_draft_only() {
        let (_dir, storage) = temp_storage();
        let mut request = submission_request("Draft work");
        request.save_as_draft = true;
        let draft = storage
            .create_submission("Abay Shimelis", request)
            .await
            .unwrap();
        assert_eq!(draft.status, SubmissionStatus::Draft);

        let err = storage
            .apply_review(draft.id, review(SubmissionStatus::Approved, "A", "3"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E011");

        let submitted = storage.submit_draft(draft.id).await.unwrap().unwrap();
        assert_eq!(submitted.status, SubmissionStatus::Submitted);

        // 已提交的不能再走定稿
        let err = storage.submit_draft(draft.id).await.unwrap_err();
        assert_eq!(err.code(), "E011");
    }

    #[tokio::test]
    async fn test_clear_history_empties_activity_but_not_store() {
        let (_dir, storage) = temp_storage();
        let created = storage
            .create_submission("Abay Shimelis", submission_request("Capstone"))
            .await
            .unwrap();
        storage
            .apply_review(created.id, review(SubmissionStatus::Approved, "A", "3"))
            .await
            .unwrap();
        assert_eq!(storage.list_student_activity("Abay Shimelis").await.unwrap().len(), 1);

        storage.clear_student_history("Abay Shimelis").await.unwrap();

        // 动态被水位线挡住
        assert!(storage.list_student_activity("Abay Shimelis").await.unwrap().is_empty());
        assert_eq!(storage.count_unread_activity("Abay Shimelis").await.unwrap(), 0);
        // 但提交本身还在，教员仍然可见
        let all = storage.list_submissions(SubmissionListQuery::default()).await.unwrap();
        assert_eq!(all.pagination.total, 1);

        // 清除之后的新评审重新出现在动态里
        storage
            .apply_review(created.id, review(SubmissionStatus::Rejected, "N/A", ""))
            .await
            .unwrap();
        assert_eq!(storage.list_student_activity("Abay Shimelis").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = StorePaths {
            users: dir.path().join("users.txt"),
            submissions: dir.path().join("submissions.txt"),
            history: dir.path().join("history_config.txt"),
        };

        let expected: Vec<Submission> = {
            let storage = FileStorage::open(paths.clone()).expect("open store");
            for i in 0..5 {
                let created = storage
                    .create_submission("Abay Shimelis", submission_request(&format!("Work {i}")))
                    .await
                    .unwrap();
                if i % 2 == 0 {
                    storage
                        .apply_review(created.id, review(SubmissionStatus::Approved, "B+", "2"))
                        .await
                        .unwrap();
                }
            }
            storage
                .list_submissions(SubmissionListQuery {
                    size: Some(100),
                    ..Default::default()
                })
                .await
                .unwrap()
                .items
        };

        // 重新打开：数量与关键字段逐条一致
        let reopened = FileStorage::open(paths).expect("reopen store");
        let actual = reopened
            .list_submissions(SubmissionListQuery {
                size: Some(100),
                ..Default::default()
            })
            .await
            .unwrap()
            .items;

        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert_eq!(a.title, e.title);
            assert_eq!(a.student_name, e.student_name);
            assert_eq!(a.status, e.status);
            assert_eq!(a.feedback, e.feedback);
            assert_eq!(a.grade, e.grade);
        }
    }

    #[tokio::test]
    async fn test_system_stats_counts_roles_and_pending() {
        let (_dir, storage) = temp_storage();
        storage.create_user(user_request("alice", UserRole::Student)).await.unwrap();
        storage.create_user(user_request("frank", UserRole::Faculty)).await.unwrap();
        let mut pending = user_request("newbie", UserRole::Student);
        pending.status = Some(UserStatus::Pending);
        storage.create_user(pending).await.unwrap();
        storage
            .create_submission("alice name", submission_request("Pending work"))
            .await
            .unwrap();

        let stats = storage.collect_system_stats().await.unwrap();
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_students, 2);
        assert_eq!(stats.total_faculty, 1);
        assert_eq!(stats.total_admins, 0);
        assert_eq!(stats.pending_accounts, 1);
        assert_eq!(stats.pending_submissions, 1);
    }
}
