pub mod create;
pub mod delete;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::teacher_students::requests::{
    CreateTeacherStudentRequest, TeacherStudentListParams,
};
use crate::storage::Storage;

pub struct TeacherStudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherStudentService {
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

    pub async fn list_links(
        &self,
        request: &HttpRequest,
        query: TeacherStudentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_links(self, request, query).await
    }

    pub async fn get_link(&self, request: &HttpRequest, link_id: i64) -> ActixResult<HttpResponse> {
        detail::get_link(self, request, link_id).await
    }

    // 教师添加学生
    pub async fn create_link(
        &self,
        request: &HttpRequest,
        req: CreateTeacherStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_link(self, request, req).await
    }

    pub async fn delete_link(
        &self,
        request: &HttpRequest,
        link_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_link(self, request, link_id).await
    }
}
