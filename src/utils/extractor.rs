//! 路径参数安全提取器
//!
//! 解析失败时返回统一的 ApiResponse 错误，而不是 actix 默认的纯文本 404/400。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        message.to_string(),
        actix_web::HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 从路径 {id} 提取 i64（用户等自增主键）
pub struct SafeIDI64(pub i64);

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .ok_or_else(|| bad_request("Missing path parameter: id"))
            .and_then(|raw| {
                raw.parse::<i64>()
                    .map(SafeIDI64)
                    .map_err(|_| bad_request("Invalid numeric id in path"))
            });
        ready(result)
    }
}

/// 从路径 {id} 提取提交的 UUID
pub struct SafeSubmissionId(pub Uuid);

impl FromRequest for SafeSubmissionId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .match_info()
            .get("id")
            .ok_or_else(|| bad_request("Missing path parameter: id"))
            .and_then(|raw| {
                Uuid::parse_str(raw)
                    .map(SafeSubmissionId)
                    .map_err(|_| bad_request("Invalid submission id in path"))
            });
        ready(result)
    }
}
