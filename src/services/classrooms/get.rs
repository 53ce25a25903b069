use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassroomService;
use crate::access::{Action, Actor, ProjectionRole};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::classrooms::responses::ClassroomDetail;
use crate::services::decision_error;

pub async fn get_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
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
                .json(ApiResponse::error_empty(format!("Classroom query failed: {e}"))));
        }
    };

    // 权限失败与资源不存在同样返回 404
    if let Some(resp) = decision_error(Action::ClassroomRead.check(&actor, &ties), "Classroom") {
        return Ok(resp);
    }

    match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => {
            let role = ProjectionRole::for_actor(&actor);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassroomDetail::project(&classroom, role),
                "Classroom retrieved successfully",
            )))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Classroom not found")))
        }
        Err(e) => {
            error!("Classroom query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Classroom query failed: {e}"))))
        }
    }
}
