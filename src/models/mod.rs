//! 数据模型定义
//!
//! 按业务领域划分，每个领域包含 entities（业务实体）、requests（请求体/查询参数）
//! 与 responses（响应体）。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod schedules;
pub mod stats;
pub mod submissions;
pub mod teacher_students;
pub mod users;

pub use common::{
    ApiResponse, FieldErrors, PaginationInfo, normalize_pagination,
    storage_error_response, validation_error_response,
};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证与授权 2xxx
    Unauthorized = 2001,
    AuthFailed = 2002,
    Forbidden = 2003,
    RoleMismatch = 2004,

    // 用户 3xxx
    UserNotFound = 3001,
    UserNameAlreadyExists = 3002,
    UserNameInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserRoleInvalid = 3005,
    RegisterFailed = 3006,
    UserUpdateFailed = 3007,
    UserDeleteFailed = 3008,

    // 师生关系 4xxx
    TeacherStudentNotFound = 4001,
    TeacherStudentAlreadyExists = 4002,

    // 作业与提交 5xxx
    AssignmentNotFound = 5001,
    SubmissionNotFound = 5002,

    // 课表 6xxx
    ScheduleNotFound = 6001,
}
