use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::access::{Action, Actor, ClassroomTies};
use crate::errors::ClasstrackError;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::enrollments::{requests::EnrollRequest, responses::EnrollResponse};
use crate::services::decision_error;

pub async fn enroll(
    service: &ClassroomService,
    request: &HttpRequest,
    enroll_data: EnrollRequest,
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

    // 只有学生角色能选课，按代码选课没有作用域教室
    if let Some(resp) = decision_error(
        Action::EnrollmentCreate.check(&actor, &ClassroomTies::NONE),
        "Classroom",
    ) {
        return Ok(resp);
    }

    // 无效代码按校验错误处理，不泄露代码空间的信息
    let classroom = match storage
        .get_classroom_by_code(enroll_data.classroom_code.trim())
        .await
    {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_with_details(
                "Validation failed",
                serde_json::json!({"classroom_code": "Invalid classroom code"}),
            )));
        }
        Err(e) => {
            error!("Classroom code lookup failed: {}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Enrollment failed: {e}"))));
        }
    };

    match storage.enroll_student(classroom.id, actor.id).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in classroom {}",
                actor.id, classroom.id
            );
            let response = EnrollResponse {
                classroom_id: classroom.id,
                classroom_name: classroom.name,
                date_joined: enrollment.date_joined,
            };
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Enrolled successfully")))
        }
        Err(ClasstrackError::Conflict(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(msg)))
        }
        Err(e) => {
            error!("Enrollment failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Enrollment failed: {e}"))))
        }
    }
}
