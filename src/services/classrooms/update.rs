use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::access::{Action, Actor, ProjectionRole};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::classrooms::{requests::UpdateClassroomRequest, responses::ClassroomDetail};
use crate::services::decision_error;

pub async fn update_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
    update_data: UpdateClassroomRequest,
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
                .json(ApiResponse::error_empty(format!("Classroom update failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(Action::ClassroomUpdate.check(&actor, &ties), "Classroom") {
        return Ok(resp);
    }

    if let Some(ref name) = update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
            "Validation failed",
            serde_json::json!({"name": "Classroom name cannot be empty"}),
        )));
    }

    match storage.update_classroom(classroom_id, update_data).await {
        Ok(Some(classroom)) => {
            info!("Classroom {} updated by user {}", classroom_id, actor.id);
            let role = ProjectionRole::for_actor(&actor);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassroomDetail::project(&classroom, role),
                "Classroom updated successfully",
            )))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Classroom not found")))
        }
        Err(e) => {
            error!("Classroom update failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Classroom update failed: {e}"))))
        }
    }
}
