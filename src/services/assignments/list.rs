use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::AssignmentListParams;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_assignments(&caller, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
