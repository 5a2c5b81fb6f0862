pub mod assignments;
pub mod auth;
pub mod schedules;
pub mod stats;
pub mod submissions;
pub mod teacher_students;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use schedules::ScheduleService;
pub use stats::StatsService;
pub use submissions::SubmissionService;
pub use teacher_students::TeacherStudentService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireSession;
use crate::models::users::entities::Caller;
use crate::models::{ApiResponse, ErrorCode};

/// 获取当前调用者，未登录时返回 401 响应
pub(crate) fn require_caller(request: &HttpRequest) -> Result<Caller, HttpResponse> {
    RequireSession::extract_caller(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })
}
