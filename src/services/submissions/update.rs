use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::UpdateSubmissionRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_content};

pub async fn update_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: UpdateSubmissionRequest,
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

    match storage
        .update_submission(&caller, submission_id, req.content)
        .await
    {
        Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SubmissionNotFound)),
    }
}
