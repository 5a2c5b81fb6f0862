use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_status, validate_title};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_title(&req.title) {
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

    req.title = req.title.trim().to_string();
    req.status = req.status.map(|s| s.trim().to_string());

    let storage = service.get_storage(request);

    // 作业教师始终为当前调用者
    match storage.create_assignment(&caller, req).await {
        Ok(assignment) => {
            tracing::info!(
                "Teacher {} created assignment {}",
                caller.id,
                assignment.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
