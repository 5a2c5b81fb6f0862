use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessPolicy;
use crate::middlewares;
use crate::services::StatsService;

// 懒加载的全局 StatsService 实例
static STATS_SERVICE: Lazy<StatsService> = Lazy::new(StatsService::new_lazy);

pub async fn teacher_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.teacher_stats(&req).await
}

pub async fn student_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATS_SERVICE.student_stats(&req).await
}

// 配置路由
pub fn configure_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/stats")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("/teacher")
                    .route(web::get().to(teacher_stats))
                    .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
            )
            .service(
                web::resource("/student")
                    .route(web::get().to(student_stats))
                    .wrap(middlewares::RequireRole::new(AccessPolicy::StudentOnly)),
            ),
    );
}
