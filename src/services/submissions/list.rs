use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::SubmissionListParams;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

/// 教师看到自己作业下的提交，学生只看到自己的提交
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_submissions(&caller, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::SubmissionNotFound)),
    }
}
