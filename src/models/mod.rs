pub mod activity;
pub mod auth;
pub mod common;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

// 程序启动时间（用于统计预处理耗时）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 业务错误码
//
// 0 为成功；1xxx 认证相关；2xxx 用户相关；3xxx 提交相关；9xxx 通用。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success = 0,

    // 认证
    AuthFailed = 1001,
    RoleMismatch = 1002,
    AccountPending = 1003,
    RegisterFailed = 1004,
    InvalidToken = 1005,

    // 用户
    UserNotFound = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserNameAlreadyExists = 2005,
    UserEmailAlreadyExists = 2006,
    UserCreationFailed = 2007,
    UserUpdateFailed = 2008,
    UserDeleteFailed = 2009,
    CanNotDeleteAdmin = 2010,
    UserNotPending = 2011,

    // 提交
    SubmissionNotFound = 3001,
    SubmissionCreateFailed = 3002,
    SubmissionUpdateFailed = 3003,
    InvalidStatusTransition = 3004,
    InvalidOrganizationEmail = 3005,

    // 通用
    BadRequest = 9400,
    Unauthorized = 9401,
    Forbidden = 9403,
    NotFound = 9404,
    RateLimitExceeded = 9429,
    InternalServerError = 9500,
}
