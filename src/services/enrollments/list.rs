use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::access::{Action, Actor};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, PaginationQuery};
use crate::models::enrollments::responses::{EnrollmentListItem, EnrollmentListResponse};
use crate::models::users::responses::UserSummary;
use crate::services::decision_error;

pub async fn list_enrollments(
    service: &EnrollmentService,
    request: &HttpRequest,
    classroom_id: i64,
    query: PaginationQuery,
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
                .json(ApiResponse::error_empty(format!("Enrollment list failed: {e}"))));
        }
    };

    // 名单只对本教室教师和管理员开放
    if let Some(resp) = decision_error(Action::EnrollmentList.check(&actor, &ties), "Classroom") {
        return Ok(resp);
    }

    match storage
        .list_enrollments_with_pagination(classroom_id, Some(query.page), Some(query.size))
        .await
    {
        Ok((rows, pagination)) => {
            let response = EnrollmentListResponse {
                items: rows
                    .iter()
                    .map(|(enrollment, student)| {
                        EnrollmentListItem::new(enrollment, UserSummary::from(student))
                    })
                    .collect(),
                pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Enrollments retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Enrollment list query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Enrollment list failed: {e}"))))
        }
    }
}
