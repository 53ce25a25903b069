use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::access::{Action, Actor, ProjectionRole, scoping::AssignmentVisibility};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::UpdateAssignmentRequest, responses::AssignmentDetail,
};
use crate::services::decision_error;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    classroom_id: i64,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
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
                .json(ApiResponse::error_empty(format!("Assignment update failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(
        Action::AssignmentUpdate.check(&actor, &ties),
        "Assignment",
    ) {
        return Ok(resp);
    }

    if let Err(errors) = update_data.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_with_details("Validation failed", errors)));
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
                .json(ApiResponse::error_empty(format!("Assignment update failed: {e}"))));
        }
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => {
            info!("Assignment {} updated by user {}", assignment_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AssignmentDetail::project(&assignment, ProjectionRole::Teacher),
                "Assignment updated successfully",
            )))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found")))
        }
        Err(e) => {
            error!("Assignment update failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment update failed: {e}"))))
        }
    }
}
