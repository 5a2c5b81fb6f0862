pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod review;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, ReviewSubmissionRequest, SubmissionListParams,
    UpdateSubmissionRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    /// 列出提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 学生提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, req).await
    }

    /// 学生修改提交内容
    pub async fn update_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: UpdateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_submission(self, request, submission_id, req).await
    }

    /// 教师批阅
    pub async fn review_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: ReviewSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        review::review_submission(self, request, submission_id, req).await
    }

    /// 删除/撤回提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }
}
