use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::requests::UpdateScheduleRequest;
use crate::models::{
    ApiResponse, ErrorCode, FieldErrors, storage_error_response, validation_error_response,
};
use crate::services::require_caller;
use crate::utils::validate::{
    parse_time_of_day, push_error, validate_day_of_week, validate_title,
};

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    req: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    // 格式校验；起止先后关系由存储层结合原记录判断
    let mut errors = FieldErrors::new();
    if let Some(day) = req.day_of_week
        && let Err(msg) = validate_day_of_week(day)
    {
        push_error(&mut errors, "day_of_week", msg);
    }
    if let Some(start) = req.start_time.as_deref()
        && let Err(msg) = parse_time_of_day(start)
    {
        push_error(&mut errors, "start_time", msg);
    }
    if let Some(end) = req.end_time.as_deref()
        && let Err(msg) = parse_time_of_day(end)
    {
        push_error(&mut errors, "end_time", msg);
    }
    if let Some(Some(title)) = &req.title
        && let Err(msg) = validate_title(title)
    {
        push_error(&mut errors, "title", msg);
    }
    if !errors.is_empty() {
        return Ok(validation_error_response(errors));
    }

    let storage = service.get_storage(request);

    match storage.update_schedule(&caller, schedule_id, req).await {
        Ok(Some(schedule)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            schedule,
            "Schedule updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScheduleNotFound,
            "Schedule not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ScheduleNotFound)),
    }
}
