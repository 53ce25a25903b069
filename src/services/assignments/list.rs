use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AssignmentService;
use crate::access::{Action, Actor, ProjectionRole, scoping};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::assignments::{
    requests::AssignmentListParams,
    responses::{AssignmentListItem, AssignmentListResponse},
};
use crate::services::decision_error;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    classroom_id: i64,
    query: AssignmentListParams,
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
                .json(ApiResponse::error_empty(format!("Assignment list failed: {e}"))));
        }
    };

    // 看不到教室的人也看不到教室里的作业列表
    if let Some(resp) = decision_error(Action::ClassroomRead.check(&actor, &ties), "Classroom") {
        return Ok(resp);
    }

    let scope = scoping::assignment_scope(&actor);
    let role = ProjectionRole::for_actor(&actor);

    match storage
        .list_assignments_with_pagination(classroom_id, scope, query)
        .await
    {
        Ok((assignments, pagination)) => {
            let response = AssignmentListResponse {
                items: assignments
                    .iter()
                    .map(|a| AssignmentListItem::project(a, role))
                    .collect(),
                pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Assignments retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Assignment list query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Assignment list failed: {e}"))))
        }
    }
}
