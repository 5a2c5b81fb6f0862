//! 请求体/查询参数解析失败时的统一响应

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体错误处理器
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON payload for {}: {}", req.path(), err);

    let (response, message) = match &err {
        JsonPayloadError::ContentType => (
            HttpResponse::UnsupportedMediaType(),
            "Content-Type must be application/json".to_string(),
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => (
            HttpResponse::PayloadTooLarge(),
            "Request body is too large".to_string(),
        ),
        _ => (HttpResponse::BadRequest(), format!("Invalid JSON: {err}")),
    };

    let mut response = response;
    let response = response.json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

/// 查询参数错误处理器
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query string for {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
