use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

/// 登录被拒绝的原因
#[derive(Debug, PartialEq)]
pub(crate) enum LoginDenial {
    // 用户不存在或密码错误，对外统一措辞避免账号枚举
    BadCredentials,
    // 凭证正确但客户端选择的身份标签与账号真实角色不符
    RoleMismatch,
    // 账号还在等待管理员审核
    AccountPending,
}

/// 核对密码、身份标签与账号状态
pub(crate) fn check_login(
    user: &User,
    password: &str,
    claimed_role: &UserRole,
) -> Result<(), LoginDenial> {
    if !verify_password(password, &user.password_hash) {
        return Err(LoginDenial::BadCredentials);
    }
    if &user.role != claimed_role {
        return Err(LoginDenial::RoleMismatch);
    }
    if user.status != UserStatus::Active {
        return Err(LoginDenial::AccountPending);
    }
    Ok(())
}

fn denial_response(denial: LoginDenial) -> HttpResponse {
    match denial {
        LoginDenial::BadCredentials => HttpResponse::Unauthorized().json(
            ApiResponse::error_empty(ErrorCode::AuthFailed, "Username or password is incorrect"),
        ),
        LoginDenial::RoleMismatch => HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::RoleMismatch,
            "Selected role does not match this account",
        )),
        LoginDenial::AccountPending => HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountPending,
            "Account is pending administrator approval",
        )),
    }
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据用户名或邮箱获取用户信息
    match storage
        .get_user_by_username_or_email(&login_request.username)
        .await
    {
        Ok(Some(user)) => {
            // 2. 核对密码与身份标签
            if let Err(denial) = check_login(&user, &login_request.password, &login_request.role) {
                tracing::info!(
                    "Login denied for {}: {:?}",
                    login_request.username.trim(),
                    denial
                );
                return Ok(denial_response(denial));
            }

            // 3. 更新最后登录时间
            let _ = storage.update_last_login(user.id).await;

            // 4. 生成令牌对
            match user.generate_token_pair(login_request.remember_me.then(|| {
                chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
            })) {
                Ok(token_pair) => {
                    tracing::info!("User {} logged in successfully", user.username);

                    let response = LoginResponse {
                        access_token: token_pair.access_token,
                        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                        user,
                        created_at: chrono::Utc::now(),
                    };

                    // 5. 创建 refresh token cookie
                    let refresh_cookie =
                        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                    Ok(HttpResponse::Ok()
                        .cookie(refresh_cookie)
                        .json(ApiResponse::success(response, "Login successful")))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to generate token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(denial_response(LoginDenial::BadCredentials)),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::password::hash_password;

    fn active_user(role: UserRole, password: &str) -> User {
        User {
            id: 1,
            name: "Student User".to_string(),
            username: "student".to_string(),
            email: "student@amazi.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            status: UserStatus::Active,
            created_at: chrono::Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_login_succeeds_with_matching_role() {
        let user = active_user(UserRole::Student, "Passw0rdOk");
        assert_eq!(check_login(&user, "Passw0rdOk", &UserRole::Student), Ok(()));
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let user = active_user(UserRole::Student, "Passw0rdOk");
        assert_eq!(
            check_login(&user, "wrong", &UserRole::Student),
            Err(LoginDenial::BadCredentials)
        );
    }

    #[test]
    fn test_login_rejects_role_mismatch_even_with_valid_credentials() {
        let user = active_user(UserRole::Student, "Passw0rdOk");
        assert_eq!(
            check_login(&user, "Passw0rdOk", &UserRole::Faculty),
            Err(LoginDenial::RoleMismatch)
        );
    }

    #[test]
    fn test_login_rejects_pending_account() {
        let mut user = active_user(UserRole::Student, "Passw0rdOk");
        user.status = UserStatus::Pending;
        assert_eq!(
            check_login(&user, "Passw0rdOk", &UserRole::Student),
            Err(LoginDenial::AccountPending)
        );
    }
}
