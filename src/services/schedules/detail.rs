use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn get_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.get_schedule(&caller, schedule_id).await {
        Ok(Some(schedule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedule,
            "Schedule retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ScheduleNotFound)),
    }
}
