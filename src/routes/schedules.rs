use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessPolicy;
use crate::middlewares;
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest,
};
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

// 懒加载的全局 ScheduleService 实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .list_schedules(&req, query.into_inner())
        .await
}

pub async fn create_schedule(
    req: HttpRequest,
    body: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, body.into_inner())
        .await
}

pub async fn get_schedule(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.get_schedule(&req, path.0).await
}

pub async fn update_schedule(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_schedule(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, path.0).await
}

// 配置路由
pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher-schedules")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    .route(web::get().to(list_schedules))
                    .route(
                        web::post()
                            .to(create_schedule)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_schedule))
                    .route(
                        web::put()
                            .to(update_schedule)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
                    )
                    .route(
                        web::delete()
                            .to(delete_schedule)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
                    ),
            ),
    );
}
