use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::ReviewSubmissionRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_content};

/// 教师批阅提交，重复批阅会覆盖上一次的评语
pub async fn review_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: ReviewSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_content(&req.review_content) {
        push_error(&mut errors, "review_content", msg);
    }
    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    match storage
        .review_submission(&caller, submission_id, req.review_content)
        .await
    {
        Ok(Some(submission)) => {
            tracing::info!("Teacher {} reviewed submission {}", caller.id, submission.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission reviewed successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SubmissionNotFound)),
    }
}
