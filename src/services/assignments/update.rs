use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_status, validate_title};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    mut req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    if let Some(title) = req.title.as_deref()
        && let Err(msg) = validate_title(title)
    {
        push_error(&mut errors, "title", msg);
    }
    if let Some(status) = req.status.as_deref()
        && let Err(msg) = validate_status(status)
    {
        push_error(&mut errors, "status", msg);
    }
    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    req.title = req.title.map(|t| t.trim().to_string());
    req.status = req.status.map(|s| s.trim().to_string());

    let storage = service.get_storage(request);

    match storage
        .update_assignment(&caller, assignment_id, req)
        .await
    {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
