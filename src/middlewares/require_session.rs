/*!
 * 会话认证中间件
 *
 * 校验请求携带的会话 Cookie，确保只有已登录用户才能访问受保护的路由。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::RequireSession;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api/v1/assignments")
 *                 .wrap(RequireSession)
 *                 .route("", web::get().to(list_assignments))
 *         )
 * })
 * ```
 *
 * 处理程序中通过 `RequireSession::extract_caller(&req)` 获取调用者身份。
 *
 * ## 认证流程
 *
 * 1. 从 Cookie 中读取会话键
 * 2. 在对象缓存中查找 `session:{key}` 对应的用户 ID
 * 3. 每次请求都从存储层重新加载用户，用户已删除时会话失效
 * 4. 将 `User` 与 `Caller` 写入请求扩展；任一步失败返回 401
 */

use crate::cache::ObjectCache;
use crate::models::ErrorCode;
use crate::models::users::entities::{Caller, User};
use crate::storage::Storage;
use crate::utils::session::SessionUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireSession;

// 辅助函数：根据会话 Cookie 解析当前用户
async fn extract_and_validate_session(req: &ServiceRequest) -> Result<User, String> {
    let session_key = SessionUtils::extract_session_key(req.request())
        .ok_or_else(|| "Missing session cookie".to_string())?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Session store unavailable".to_string())?
        .get_ref()
        .clone();

    let user_id = SessionUtils::resolve_session(cache.as_ref(), &session_key)
        .await
        .ok_or_else(|| "Session expired or invalid".to_string())?;

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage unavailable".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|_| "Failed to retrieve user from storage".to_string())?;

    match user {
        Some(user) => Ok(user),
        None => {
            // 用户已被删除，清理残留会话
            SessionUtils::destroy_session(cache.as_ref(), &session_key).await;
            Err("User not found".to_string())
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
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
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_session(&req).await {
                Ok(user) => {
                    debug!("Session authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user.caller());
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "Session authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireSession {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了 RequireSession 中间件的路由处理程序中使用
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取调用者身份
    pub fn extract_caller(req: &HttpRequest) -> Option<Caller> {
        req.extensions().get::<Caller>().copied()
    }
}
