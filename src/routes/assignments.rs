use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::services::{AssignmentService, EnrollmentService};
use crate::utils::{SafeAssignmentIdI64, SafeClassroomIdI64};

// 懒加载的全局服务实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// 列出教室内的作业
pub async fn list_assignments(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, classroom.0, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, classroom.0, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, classroom.0, assignment.0)
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, classroom.0, assignment.0, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, classroom.0, assignment.0)
        .await
}

// 查看教室选课名单（挂在作业路径下，名单本身与具体作业无关）
pub async fn list_enrollments(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(&req, classroom.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classrooms/{classroom_id}/assignments")
            .wrap(middlewares::RequireJWT)
            // 列表 - 学生只能看到已发布的作业
            .service(web::resource("").route(web::get().to(list_assignments)))
            // 创建 - 仅本教室教师和管理员
            .service(web::resource("/create").route(web::post().to(create_assignment)))
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            // 选课名单 - 仅本教室教师和管理员
            .service(
                web::resource("/{assignment_id}/enrollments")
                    .route(web::get().to(list_enrollments)),
            ),
    );
}
