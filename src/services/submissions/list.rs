use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::access::{Action, Actor, ClassroomTies, scoping};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::submissions::requests::SubmissionListParams;
use crate::models::submissions::responses::SubmissionResponse;
use crate::models::users::responses::UserSummary;
use crate::services::decision_error;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_id: i64,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty("Unauthorized: missing user")));
        }
    };
    let actor = Actor::from(&user);

    // 列表动作对所有已认证用户开放，非成员由 scoping 得到空集
    if let Some(resp) = decision_error(
        Action::SubmissionList.check(&actor, &ClassroomTies::NONE),
        "Assignment",
    ) {
        return Ok(resp);
    }

    // 作业存在即可列出，行级可见性由 scoping 决定
    let assignment = match storage
        .get_assignment_in_classroom(
            classroom_id,
            assignment_id,
            scoping::AssignmentVisibility::AnyStatus,
        )
        .await
    {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found"))
            );
        }
        Err(e) => {
            error!("Assignment lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission list failed: {e}"))));
        }
    };

    match storage
        .list_submissions(assignment_id, scoping::submission_scope(&actor), query)
        .await
    {
        Ok(rows) => {
            let items: Vec<SubmissionResponse> = rows
                .iter()
                .map(|(submission, student, files)| {
                    SubmissionResponse::new(
                        submission,
                        UserSummary::from(student),
                        &assignment,
                        files,
                    )
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                items,
                "Submissions retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Submission list query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Submission list failed: {e}"))))
        }
    }
}
