use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode, storage_error_response};
use crate::services::require_caller;
use crate::storage::Storage;

/// 统计数据按请求实时计算
pub struct StatsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
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

    pub async fn teacher_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let caller = match require_caller(request) {
            Ok(caller) => caller,
            Err(response) => return Ok(response),
        };

        match self.get_storage(request).teacher_stats(&caller).await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Teacher statistics retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response(&e, ErrorCode::NotFound)),
        }
    }

    pub async fn student_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let caller = match require_caller(request) {
            Ok(caller) => caller,
            Err(response) => return Ok(response),
        };

        match self.get_storage(request).student_stats(&caller).await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Student statistics retrieved successfully",
            ))),
            Err(e) => Ok(storage_error_response(&e, ErrorCode::NotFound)),
        }
    }
}
