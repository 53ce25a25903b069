use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::SubmissionListParams;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeClassroomIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 列出作业下的提交
pub async fn list_submissions(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, classroom.0, assignment.0, query.into_inner())
        .await
}

// 上传附件并提交作业
pub async fn create_submission(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, classroom.0, assignment.0, payload)
        .await
}

// 删除提交
pub async fn delete_submission(
    req: HttpRequest,
    classroom: SafeClassroomIdI64,
    assignment: SafeAssignmentIdI64,
    submission: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, classroom.0, assignment.0, submission.0)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classrooms/{classroom_id}/assignments/{assignment_id}/submissions")
            .wrap(middlewares::RequireJWT)
            // 列表 - 教师看已提交，学生看自己
            .service(web::resource("").route(web::get().to(list_submissions)))
            // 提交 - multipart 上传，仅本教室学生和管理员
            .service(web::resource("/create").route(web::post().to(create_submission)))
            // 删除 - 学生限自己的提交
            .service(
                web::resource("/{submission_id}").route(web::delete().to(delete_submission)),
            ),
    );
}
