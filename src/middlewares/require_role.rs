/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireSession 中间件之后使用，按 [`AccessPolicy`] 判定调用者角色。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::access::AccessPolicy;
 * use crate::middlewares::{RequireRole, RequireSession};
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api/v1/stats")
 *                 .wrap(RequireSession)
 *                 .service(
 *                     web::resource("/teacher")
 *                         .wrap(RequireRole::new(AccessPolicy::TeacherOnly))
 *                         .route(web::get().to(teacher_stats)),
 *                 )
 *         )
 * })
 * ```
 *
 * 注意 actix 的 `wrap` 后注册先执行，`RequireSession` 应写在外层 scope 上。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::access::AccessPolicy;
use crate::models::{ErrorCode, users::entities::Caller};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    policy: AccessPolicy,
}

impl RequireRole {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.policy,
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: AccessPolicy,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let policy = self.policy;

        Box::pin(async move {
            let caller = req.extensions().get::<Caller>().copied();

            match caller {
                Some(caller) if policy.permits(Some(&caller)) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(caller) => {
                    info!(
                        "Access denied for user {} (role: {}). Required: {}",
                        caller.id,
                        caller.role,
                        policy.required_role()
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::RoleMismatch,
                            &format!("Role mismatch: {} required", policy.required_role()),
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: No caller found in request. Make sure RequireSession middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
