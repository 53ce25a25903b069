use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::access::{Action, Actor};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::services::decision_error;

pub async fn delete_classroom(
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
                .json(ApiResponse::error_empty(format!("Classroom deletion failed: {e}"))));
        }
    };

    if let Some(resp) = decision_error(Action::ClassroomDelete.check(&actor, &ties), "Classroom") {
        return Ok(resp);
    }

    // 作业与选课记录随外键级联删除
    match storage.delete_classroom(classroom_id).await {
        Ok(true) => {
            info!("Classroom {} deleted by user {}", classroom_id, actor.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Classroom deleted successfully",
            )))
        }
        Ok(false) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty("Classroom not found")))
        }
        Err(e) => {
            error!("Classroom deletion failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Classroom deletion failed: {e}"))))
        }
    }
}
