use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_assignment(&caller, assignment_id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
