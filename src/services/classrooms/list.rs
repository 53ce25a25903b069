use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ClassroomService;
use crate::access::{Actor, scoping};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::classrooms::{
    requests::ClassroomListParams,
    responses::{ClassroomListItem, ClassroomListResponse},
};

pub async fn list_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
    query: ClassroomListParams,
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

    // 角色决定可见集合：教师看自己的，学生看已选的，管理员看全部
    let scope = scoping::classroom_scope(&actor);

    match storage.list_classrooms_with_pagination(scope, query).await {
        Ok((classrooms, pagination)) => {
            let response = ClassroomListResponse {
                items: classrooms.iter().map(ClassroomListItem::from).collect(),
                pagination,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Classrooms retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Classroom list query failed: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(format!("Classroom list failed: {e}"))))
        }
    }
}
