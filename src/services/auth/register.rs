use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode, FieldErrors,
    auth::{LoginResponse, RegisterRequest},
    storage_error_response,
    users::requests::CreateUser,
    validation_error_response,
};
use crate::utils::password::hash_password;
use crate::utils::session::SessionUtils;
use crate::utils::validate::{
    push_error, validate_avatar_url, validate_full_name, validate_password,
    validate_phone_number, validate_role, validate_username,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 1. 字段校验，所有错误一次性返回
    let mut errors = FieldErrors::new();

    if let Err(msg) = validate_username(&register_request.username) {
        push_error(&mut errors, "username", msg);
    }
    let password_check = validate_password(&register_request.password);
    for msg in &password_check.errors {
        push_error(&mut errors, "password", *msg);
    }
    let role = match validate_role(&register_request.role) {
        Ok(role) => Some(role),
        Err(msg) => {
            push_error(&mut errors, "role", msg);
            None
        }
    };
    if let Err(msg) = validate_full_name(&register_request.full_name) {
        push_error(&mut errors, "full_name", msg);
    }
    if let Some(phone) = register_request.phone_number.as_deref()
        && let Err(msg) = validate_phone_number(phone)
    {
        push_error(&mut errors, "phone_number", msg);
    }
    if let Some(avatar) = register_request.avatar.as_deref()
        && let Err(msg) = validate_avatar_url(avatar)
    {
        push_error(&mut errors, "avatar", msg);
    }

    let role = match role {
        Some(role) if errors.is_empty() => role,
        _ => return Ok(validation_error_response(errors)),
    };

    let storage = service.get_storage(request);

    // 2. 检查用户名是否已存在
    match storage.get_user_by_username(&register_request.username).await {
        Ok(Some(_)) => return Ok(username_taken_response()),
        Ok(None) => {}
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::RegisterFailed)),
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 4. 创建用户；并发注册同名用户时由唯一约束兜底
    let user = match storage
        .create_user(CreateUser {
            username: register_request.username,
            password_hash,
            role,
            full_name: register_request.full_name.trim().to_string(),
            avatar: register_request.avatar,
            phone_number: register_request.phone_number,
        })
        .await
    {
        Ok(user) => user,
        Err(e) if e.status_code() == actix_web::http::StatusCode::CONFLICT => {
            return Ok(username_taken_response());
        }
        Err(e) => return Ok(storage_error_response(&e, ErrorCode::RegisterFailed)),
    };

    // 5. 注册即登录
    let cache = service.get_cache(request);
    let session_key = SessionUtils::create_session(cache.as_ref(), user.id).await;
    tracing::info!("User {} registered as {}", user.username, user.role);

    let response = LoginResponse {
        user,
        expires_in: service.get_config().session.ttl as i64,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Created()
        .cookie(SessionUtils::create_session_cookie(&session_key))
        .json(ApiResponse::success(response, "Registration successful")))
}

fn username_taken_response() -> HttpResponse {
    let mut errors = FieldErrors::new();
    push_error(&mut errors, "username", "A user with that username already exists");
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::UserNameAlreadyExists,
        errors,
        "Username already exists",
    ))
}
