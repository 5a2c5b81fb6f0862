pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest,
};
use crate::storage::Storage;

pub struct ScheduleService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScheduleService {
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

    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        query: ScheduleListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, query).await
    }

    pub async fn get_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_schedule(self, request, schedule_id).await
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        req: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_schedule(self, request, req).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        req: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_schedule(self, request, schedule_id, req).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_schedule(self, request, schedule_id).await
    }
}
