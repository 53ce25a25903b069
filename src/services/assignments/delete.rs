use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::access::{Action, Actor, scoping::AssignmentVisibility};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::decision_error;

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_id: i64,
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
                .json(ApiResponse::error_empty(format!("Assignment deletion failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(
        Action::AssignmentDelete.check(&actor, &ties),
        "Assignment",
    ) {
        return Ok(resp);
    }

    // 作业必须属于该教室
    match storage
        .get_assignment_in_classroom(classroom_id, assignment_id, AssignmentVisibility::AnyStatus)
        .await
    {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found"))
            );
        }
        Err(e) => {
            error!("Assignment lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment deletion failed: {e}"))));
        }
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!("Assignment {} deleted by user {}", assignment_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found")))
        }
        Err(e) => {
            error!("Assignment deletion failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment deletion failed: {e}"))))
        }
    }
}
