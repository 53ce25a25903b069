use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::access::{Action, Actor, ProjectionRole, scoping};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assignments::responses::AssignmentDetail;
use crate::services::decision_error;

pub async fn get_assignment(
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
                .json(ApiResponse::error_empty(format!("Assignment query failed: {e}"))));
        }
    };

    // 权限失败伪装为 404
    if let Some(resp) = decision_error(Action::AssignmentRead.check(&actor, &ties), "Assignment") {
        return Ok(resp);
    }

    // 学生只能命中已发布的作业，草稿的未命中与不存在不可区分
    let scope = scoping::assignment_scope(&actor);

    match storage
        .get_assignment_in_classroom(classroom_id, assignment_id, scope)
        .await
    {
        Ok(Some(assignment)) => {
            let role = ProjectionRole::for_actor(&actor);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AssignmentDetail::project(&assignment, role),
                "Assignment retrieved successfully",
            )))
        }
        Ok(None) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Assignment not found")))
        }
        Err(e) => {
            error!("Assignment query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment query failed: {e}"))))
        }
    }
}
