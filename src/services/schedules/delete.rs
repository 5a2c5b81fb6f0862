use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.delete_schedule(&caller, schedule_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Schedule deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ScheduleNotFound)),
    }
}
