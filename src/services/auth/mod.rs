pub mod login;
pub mod logout;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::auth::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        if let Some(cache) = &self.cache {
            cache.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
                .expect("Cache not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 注册（成功后自动登录）
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 登出
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 获取当前用户信息
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_me(request).await
    }

    // 更新个人资料
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_request, request).await
    }

    // 注销账户
    pub async fn delete_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_delete_me(self, request).await
    }
}
