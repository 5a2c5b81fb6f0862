use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn register(
    req: HttpRequest,
    user_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(user_data.into_inner(), &req).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn get_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_me(&request).await
}

pub async fn update_me(
    request: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(update_data.into_inner(), &request)
        .await
}

pub async fn delete_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.delete_me(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(login))
            .route("/register", web::post().to(register))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireSession)
                    .route("/logout", web::post().to(logout))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(get_me))
                            .route(web::put().to(update_me))
                            .route(web::delete().to(delete_me)),
                    ),
            ),
    );
}
