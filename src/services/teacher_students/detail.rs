use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherStudentService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn get_link(
    service: &TeacherStudentService,
    request: &HttpRequest,
    link_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_teacher_student(&caller, link_id).await {
        Ok(Some(link)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            link,
            "Teacher-student relation retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherStudentNotFound,
            "Teacher-student relation not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::TeacherStudentNotFound)),
    }
}
