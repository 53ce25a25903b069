use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::access::{Action, Actor, ProjectionRole};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::CreateAssignmentRequest, responses::AssignmentDetail,
};
use crate::services::decision_error;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_data: CreateAssignmentRequest,
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

    let ties = match storage.resolve_classroom_ties(actor.id, classroom_id).await {
        Ok(ties) => ties,
        Err(e) => {
            error!("Failed to resolve classroom ties: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment creation failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(
        Action::AssignmentCreate.check(&actor, &ties),
        "Assignment",
    ) {
        return Ok(resp);
    }

    // 教室必须存在（非本教室教师已在上面被拒）
    match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Classroom not found"))
            );
        }
        Err(e) => {
            error!("Classroom lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment creation failed: {e}"))));
        }
    }

    // 分数与截止日期校验
    if let Err(errors) = assignment_data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_with_details("Validation failed", errors)));
    }

    match storage.create_assignment(classroom_id, assignment_data).await {
        Ok(assignment) => {
            info!(
                "Assignment {} created in classroom {} by user {}",
                assignment.id, classroom_id, actor.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                AssignmentDetail::project(&assignment, ProjectionRole::Teacher),
                "Assignment created successfully",
            )))
        }
        Err(e) => {
            error!("Assignment creation failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment creation failed: {e}"))))
        }
    }
}
