use std::collections::BTreeMap;

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::TutorDeskError;
use crate::models::ErrorCode;

/// 字段级校验错误：字段名 -> 错误信息列表
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 将存储层错误映射为 HTTP 响应
///
/// `not_found_code` 用于区分具体的资源类型（作业/提交/课表等）。
pub fn storage_error_response(err: &TutorDeskError, not_found_code: ErrorCode) -> HttpResponse {
    let code = match err {
        TutorDeskError::Validation(msg) => return validation_error_response(field_errors_from(msg)),
        TutorDeskError::DateParse(_) => ErrorCode::ValidationFailed,
        TutorDeskError::Authentication(_) => ErrorCode::Unauthorized,
        TutorDeskError::Authorization(_) => ErrorCode::RoleMismatch,
        TutorDeskError::NotFound(_) => not_found_code,
        TutorDeskError::Conflict(_) => ErrorCode::Conflict,
        _ => ErrorCode::InternalServerError,
    };

    if code == ErrorCode::InternalServerError {
        tracing::error!("Storage operation failed: {}", err);
    }

    HttpResponse::build(err.status_code()).json(ApiResponse::error_empty(code, err.message()))
}

/// 字段校验失败响应
pub fn validation_error_response(errors: FieldErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error(
        ErrorCode::ValidationFailed,
        errors,
        "Validation failed",
    ))
}

/// 解析 "field: message" 格式的校验错误，无字段前缀时归入 `detail`
fn field_errors_from(message: &str) -> FieldErrors {
    let (field, detail) = match message.split_once(": ") {
        Some((field, detail))
            if !field.is_empty()
                && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
        {
            (field, detail)
        }
        _ => ("detail", message),
    };

    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![detail.to_string()]);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_from_message() {
        let errors = field_errors_from("student_id: student not found in your class");
        assert_eq!(
            errors.get("student_id"),
            Some(&vec!["student not found in your class".to_string()])
        );

        let errors = field_errors_from("Something went wrong: badly");
        assert_eq!(
            errors.get("detail"),
            Some(&vec!["Something went wrong: badly".to_string()])
        );
    }

    #[test]
    fn test_storage_error_status() {
        let resp = storage_error_response(
            &TutorDeskError::not_found("gone"),
            ErrorCode::AssignmentNotFound,
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let resp = storage_error_response(
            &TutorDeskError::validation("title: too long"),
            ErrorCode::AssignmentNotFound,
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let resp =
            storage_error_response(&TutorDeskError::conflict("dup"), ErrorCode::NotFound);
        assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
    }
}
