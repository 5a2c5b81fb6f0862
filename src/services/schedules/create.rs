use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::requests::CreateScheduleRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{push_error, validate_day_of_week, validate_time_range, validate_title};

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    req: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let mut errors = FieldErrors::new();
    if let Err(msg) = validate_day_of_week(req.day_of_week) {
        push_error(&mut errors, "day_of_week", msg);
    }
    validate_time_range(&req.start_time, &req.end_time, &mut errors);
    if let Some(title) = req.title.as_deref()
        && let Err(msg) = validate_title(title)
    {
        push_error(&mut errors, "title", msg);
    }
    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    match storage.create_schedule(&caller, req).await {
        Ok(schedule) => {
            tracing::info!("Teacher {} created schedule {}", caller.id, schedule.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                schedule,
                "Schedule created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ScheduleNotFound)),
    }
}
