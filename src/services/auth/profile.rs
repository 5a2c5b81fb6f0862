use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireSession;
use crate::models::auth::{UpdateProfileRequest, UserInfoResponse};
use crate::models::users::requests::UpdateUser;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session::SessionUtils;
use crate::utils::validate::{
    push_error, validate_avatar_url, validate_full_name, validate_password,
    validate_phone_number,
};

use super::AuthService;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Authentication required",
    ))
}

pub async fn handle_get_me(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireSession::extract_user(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(unauthorized()),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireSession::extract_user(request) {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    let mut errors = FieldErrors::new();

    if let Some(full_name) = update_data.full_name.as_deref()
        && let Err(msg) = validate_full_name(full_name)
    {
        push_error(&mut errors, "full_name", msg);
    }
    if let Some(phone) = update_data.phone_number.as_deref()
        && let Err(msg) = validate_phone_number(phone)
    {
        push_error(&mut errors, "phone_number", msg);
    }
    if let Some(avatar) = update_data.avatar.as_deref()
        && let Err(msg) = validate_avatar_url(avatar)
    {
        push_error(&mut errors, "avatar", msg);
    }

    // 修改密码需要校验当前密码
    if let Some(password) = update_data.password.as_deref() {
        let check = validate_password(password);
        for msg in &check.errors {
            push_error(&mut errors, "password", *msg);
        }
        match update_data.current_password.as_deref() {
            Some(current) if verify_password(current, &current_user.password_hash) => {}
            Some(_) => push_error(&mut errors, "current_password", "Current password is incorrect"),
            None => push_error(
                &mut errors,
                "current_password",
                "Current password is required to change password",
            ),
        }
    }

    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    let password_hash = match update_data.password.as_deref().map(hash_password).transpose() {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserUpdateFailed,
                    "Failed to update profile",
                )),
            );
        }
    };

    let storage = service.get_storage(request);
    let update = UpdateUser {
        full_name: update_data.full_name.map(|name| name.trim().to_string()),
        avatar: update_data.avatar,
        phone_number: update_data.phone_number,
        password_hash,
    };

    match storage.update_user(current_user.id, update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::UserNotFound)),
    }
}

/// 注销当前账户，关联数据随外键级联删除
pub async fn handle_delete_me(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireSession::extract_user(request) {
        Some(user) => user,
        None => return Ok(unauthorized()),
    };

    let storage = service.get_storage(request);

    match storage.delete_user(current_user.id).await {
        Ok(true) => {
            if let Some(session_key) = SessionUtils::extract_session_key(request) {
                let cache = service.get_cache(request);
                SessionUtils::destroy_session(cache.as_ref(), &session_key).await;
            }
            tracing::info!("User {} deleted their account", current_user.username);
            Ok(HttpResponse::Ok()
                .cookie(SessionUtils::create_empty_session_cookie())
                .json(ApiResponse::<()>::success_empty("Account deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to delete user {}: {}", current_user.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserDeleteFailed,
                    "Failed to delete account",
                )),
            )
        }
    }
}
