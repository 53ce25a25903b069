pub mod create;
pub mod delete;
pub mod list;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::SubmissionListParams;
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

    // 列出作业下的提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        assignment_id: i64,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, classroom_id, assignment_id, query).await
    }

    // 上传附件并提交作业
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        assignment_id: i64,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, classroom_id, assignment_id, payload).await
    }

    // 删除提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        assignment_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, classroom_id, assignment_id, submission_id).await
    }
}
