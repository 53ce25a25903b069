use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

use super::SubmissionService;
use crate::access::{Action, Actor, scoping::AssignmentVisibility};
use crate::config::AppConfig;
use crate::errors::ClasstrackError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::users::responses::UserSummary;
use crate::services::decision_error;
use crate::utils::file_path::submission_file_path;

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_id: i64,
    mut payload: Multipart,
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
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    // 仅本教室学生与管理员可提交
    if let Some(resp) = decision_error(Action::SubmissionCreate.check(&actor, &ties), "Assignment")
    {
        return Ok(resp);
    }

    let classroom = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Classroom not found"))
            );
        }
        Err(e) => {
            error!("Classroom lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    // 只能向已发布的作业提交，草稿作业对提交者不可见
    let assignment = match storage
        .get_assignment_in_classroom(classroom_id, assignment_id, AssignmentVisibility::AnyStatus)
        .await
    {
        Ok(Some(assignment)) if assignment.status == AssignmentStatus::Published => assignment,
        Ok(_) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found"))
            );
        }
        Err(e) => {
            error!("Assignment lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    // 已提交过的作业不允许重复提交
    match storage
        .get_submission_for_student(assignment_id, actor.id)
        .await
    {
        Ok(Some(existing)) if existing.status == SubmissionStatus::Submitted => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                "Assignment has already been submitted",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            error!("Submission lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    }

    // 草稿占位行，并发重复创建由唯一约束兜底
    let submission = match storage
        .get_or_create_draft_submission(assignment_id, actor.id)
        .await
    {
        Ok(submission) => submission,
        Err(ClasstrackError::Conflict(msg)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(msg)));
        }
        Err(e) => {
            error!("Submission creation failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    let upload_dir = &config.upload.dir;
    let max_size = config.upload.max_size;
    let mut uploaded_any = false;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }

        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        if file_name.is_empty() {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty("Uploaded file must have a name")));
        }

        let relative_path = submission_file_path(
            &classroom.name,
            classroom_id,
            &user.username,
            assignment_id,
            &file_name,
        );
        let disk_path = format!("{upload_dir}/{relative_path}");

        if let Some(parent) = Path::new(&disk_path).parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            error!("Failed to create upload directory: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty("Failed to store uploaded file")));
        }

        let mut f = match File::create(&disk_path) {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to create file {}: {}", disk_path, e);
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty("Failed to store uploaded file")));
            }
        };

        let mut total_size: usize = 0;
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            total_size += data.len();
            if total_size > max_size {
                let _ = fs::remove_file(&disk_path);
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty("File size exceeds the limit")));
            }
            f.write_all(&data)?;
        }

        if let Err(e) = storage
            .add_submission_file(submission.id, &file_name, &relative_path, total_size as i64)
            .await
        {
            error!("Failed to record submission file: {}", e);
            let _ = fs::remove_file(&disk_path);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
        uploaded_any = true;
    }

    if !uploaded_any {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty("No file found in upload payload")));
    }

    let submission = match storage.finalize_submission(submission.id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Submission not found"))
            );
        }
        Err(e) => {
            error!("Failed to finalize submission: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    let files = match storage.list_submission_files(submission.id).await {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to list submission files: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission failed: {e}"))));
        }
    };

    info!(
        "Submission {} finalized for assignment {} by user {}",
        submission.id, assignment_id, actor.id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        SubmissionResponse::new(&submission, UserSummary::from(&user), &assignment, &files),
        "Assignment submitted successfully",
    )))
}
