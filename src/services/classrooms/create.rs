use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::access::{Action, Actor, ClassroomTies, ProjectionRole};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::classrooms::{requests::CreateClassroomRequest, responses::ClassroomDetail};
use crate::services::decision_error;

pub async fn create_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_data: CreateClassroomRequest,
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

    // 创建动作没有作用域教室，用空归属判定
    if let Some(resp) = decision_error(
        Action::ClassroomCreate.check(&actor, &ClassroomTies::NONE),
        "Classroom",
    ) {
        return Ok(resp);
    }

    if classroom_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
            "Validation failed",
            serde_json::json!({"name": "Classroom name cannot be empty"}),
        )));
    }

    match storage.create_classroom(actor.id, classroom_data).await {
        Ok(classroom) => {
            info!(
                "Classroom {} created by user {}",
                classroom.name, actor.id
            );
            // 创建者总是拿到带加入代码的教师形状
            let detail = ClassroomDetail::project(&classroom, ProjectionRole::Teacher);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Classroom created successfully")))
        }
        Err(e) => {
            error!("Classroom creation failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Classroom creation failed: {e}"))))
        }
    }
}
