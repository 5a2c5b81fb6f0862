use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherStudentService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

/// 解除师生关系，只影响当前教师自己的记录
pub async fn delete_link(
    service: &TeacherStudentService,
    request: &HttpRequest,
    link_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.delete_teacher_student(&caller, link_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Student removed successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherStudentNotFound,
            "Teacher-student relation not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::TeacherStudentNotFound)),
    }
}
