use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use tracing::{error, info, warn};

use super::SubmissionService;
use crate::access::{Action, Actor};
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::decision_error;

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty("Unauthorized: missing user")));
        }
    };
    let actor = Actor::from(&user);

    let ties = match storage.resolve_classroom_ties(actor.id, classroom_id).await {
        Ok(ties) => ties,
        Err(e) => {
            error!("Failed to resolve classroom ties: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission deletion failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(Action::SubmissionDelete.check(&actor, &ties), "Submission")
    {
        return Ok(resp);
    }

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) if submission.assignment_id == assignment_id => submission,
        Ok(_) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Submission not found"))
            );
        }
        Err(e) => {
            error!("Submission lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission deletion failed: {e}"))));
        }
    };

    // 学生只能删除自己的提交
    if !actor.is_superuser && submission.student_id != actor.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty("Permission denied")));
    }

    // 先清磁盘文件，失败不阻塞记录删除
    match storage.list_submission_files(submission_id).await {
        Ok(files) => {
            for file in files {
                let disk_path = format!("{}/{}", config.upload.dir, file.file_path);
                if let Err(e) = fs::remove_file(&disk_path) {
                    warn!("Failed to remove submission file {}: {}", disk_path, e);
                }
            }
        }
        Err(e) => {
            warn!("Failed to list submission files for cleanup: {}", e);
        }
    }

    match storage.delete_submission(submission_id).await {
        Ok(true) => {
            info!(
                "Submission {} deleted by user {}",
                submission_id, actor.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Submission deleted successfully",
            )))
        }
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Submission not found")))
        }
        Err(e) => {
            error!("Submission deletion failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission deletion failed: {e}"))))
        }
    }
}
