use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherStudentService;
use crate::models::teacher_students::requests::TeacherStudentListParams;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn list_links(
    service: &TeacherStudentService,
    request: &HttpRequest,
    query: TeacherStudentListParams,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_teacher_students(&caller, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teacher-student list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::TeacherStudentNotFound)),
    }
}
