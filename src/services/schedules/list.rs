use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::requests::ScheduleListParams;
use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;

/// 学生可见范围为所有与其建立师生关系的教师的安排
pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleListParams,
) -> ActixResult<HttpResponse> {
    let caller = match require_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    match storage.list_schedules(&caller, query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Schedule list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(&e, ErrorCode::ScheduleNotFound)),
    }
}
