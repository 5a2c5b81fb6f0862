use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use super::TeacherStudentService;
use crate::models::teacher_students::requests::CreateTeacherStudentRequest;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn create_link(
    service: &TeacherStudentService,
    request: &HttpRequest,
    req: CreateTeacherStudentRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.create_teacher_student(&caller, req.student_id).await {
        Ok(link) => {
            tracing::info!("Teacher {} added student {}", caller.id, link.student_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                link,
                "Student added successfully",
            )))
        }
        Err(e) if e.status_code() == StatusCode::CONFLICT => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TeacherStudentAlreadyExists,
                "Student is already in your class",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::UserNotFound)),
    }
}
