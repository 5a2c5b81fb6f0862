use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

/// 删除作业，其下的提交随外键级联删除
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.delete_assignment(&caller, assignment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Assignment deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
