pub mod assignments;
pub mod auth;
pub mod schedules;
pub mod stats;
pub mod submissions;
pub mod teacher_students;
pub mod users;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use schedules::configure_schedules_routes;
pub use stats::configure_stats_routes;
pub use submissions::configure_submissions_routes;
pub use teacher_students::configure_teacher_students_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_teacher_students_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes)
        .configure(configure_schedules_routes)
        .configure(configure_stats_routes);
}
