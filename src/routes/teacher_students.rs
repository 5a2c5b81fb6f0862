use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessPolicy;
use crate::middlewares;
use crate::models::teacher_students::requests::{
    CreateTeacherStudentRequest, TeacherStudentListParams,
};
use crate::services::TeacherStudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TeacherStudentService 实例
static TEACHER_STUDENT_SERVICE: Lazy<TeacherStudentService> =
    Lazy::new(TeacherStudentService::new_lazy);

pub async fn list_links(
    req: HttpRequest,
    query: web::Query<TeacherStudentListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_STUDENT_SERVICE
        .list_links(&req, query.into_inner())
        .await
}

pub async fn create_link(
    req: HttpRequest,
    body: web::Json<CreateTeacherStudentRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_STUDENT_SERVICE
        .create_link(&req, body.into_inner())
        .await
}

pub async fn get_link(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_STUDENT_SERVICE.get_link(&req, path.0).await
}

pub async fn delete_link(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_STUDENT_SERVICE.delete_link(&req, path.0).await
}

// 配置路由
pub fn configure_teacher_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher-students")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    // 列表 - 师生双方均可查看各自的关系
                    .route(web::get().to(list_links))
                    // 添加学生 - 仅教师
                    .route(
                        web::post()
                            .to(create_link)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_link))
                    .route(
                        web::delete()
                            .to(delete_link)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
                    ),
            ),
    );
}
