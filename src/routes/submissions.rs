use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessPolicy;
use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
    UpdateSubmissionRequest,
};
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

// 提交作业
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, path.0).await
}

// 修改提交
pub async fn update_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .update_submission(&req, path.0, body.into_inner())
        .await
}

// 批阅提交
pub async fn review_submission(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ReviewSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .review_submission(&req, path.0, body.into_inner())
        .await
}

// 删除/撤回提交
pub async fn delete_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.delete_submission(&req, path.0).await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireSession)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    // 提交作业 - 仅学生
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::StudentOnly)),
                    ),
            )
            .service(
                web::resource("/{id}/review")
                    // 批阅 - 仅教师
                    .route(web::put().to(review_submission))
                    .wrap(middlewares::RequireRole::new(AccessPolicy::TeacherOnly)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(
                        web::put()
                            .to(update_submission)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::StudentOnly)),
                    )
                    .route(
                        web::delete()
                            .to(delete_submission)
                            .wrap(middlewares::RequireRole::new(AccessPolicy::StudentOnly)),
                    ),
            ),
    );
}
