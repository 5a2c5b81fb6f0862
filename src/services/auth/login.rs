use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};
use crate::utils::password::verify_password;
use crate::utils::session::SessionUtils;

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名获取用户信息
    let user = match storage.get_user_by_username(&login_request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "Username or password is incorrect",
            )));
        }
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        )));
    }

    // 3. 创建会话
    let cache = service.get_cache(request);
    let session_key = SessionUtils::create_session(cache.as_ref(), user.id).await;
    tracing::info!("User {} logged in successfully", user.username);

    let response = LoginResponse {
        user,
        expires_in: service.get_config().session.ttl as i64,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(SessionUtils::create_session_cookie(&session_key))
        .json(ApiResponse::success(response, "Login successful")))
}
