use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::session::SessionUtils;

use super::AuthService;

/// 处理用户登出
/// 删除服务端会话，并通过 max_age=0 的空 Cookie 让浏览器清除会话键
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(session_key) = SessionUtils::extract_session_key(request) {
        let cache = service.get_cache(request);
        SessionUtils::destroy_session(cache.as_ref(), &session_key).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(SessionUtils::create_empty_session_cookie())
        .json(ApiResponse::<()>::success_empty("Logged out")))
}
