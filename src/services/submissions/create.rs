use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_content};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_content(&req.content) {
        push_error(&mut errors, "content", msg);
    }
    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    // 作业必须分配给当前学生，否则按不存在处理
    match storage.create_submission(&caller, req).await {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted assignment {}",
                caller.id,
                submission.assignment_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::AssignmentNotFound)),
    }
}
