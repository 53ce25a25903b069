use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classrooms::requests::{
    ClassroomListParams, CreateClassroomRequest, UpdateClassroomRequest,
};
use crate::models::enrollments::requests::EnrollRequest;
use crate::services::ClassroomService;
use crate::utils::SafeClassroomIdI64;

// 懒加载的全局 ClassroomService 实例
static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);

// 列出教室（按角色作用域过滤）
pub async fn list_classrooms(
    req: HttpRequest,
    query: web::Query<ClassroomListParams>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .list_classrooms(&req, query.into_inner())
        .await
}

// 创建教室
pub async fn create_classroom(
    req: HttpRequest,
    body: web::Json<CreateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .create_classroom(&req, body.into_inner())
        .await
}

// 获取教室详情
pub async fn get_classroom(
    req: HttpRequest,
    path: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom(&req, path.0).await
}

// 更新教室信息
pub async fn update_classroom(
    req: HttpRequest,
    path: SafeClassroomIdI64,
    body: web::Json<UpdateClassroomRequest>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .update_classroom(&req, path.0, body.into_inner())
        .await
}

// 删除教室
pub async fn delete_classroom(
    req: HttpRequest,
    path: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.delete_classroom(&req, path.0).await
}

// 按代码加入教室
pub async fn enroll(req: HttpRequest, body: web::Json<EnrollRequest>) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.enroll(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_classroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classrooms")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 可见集合在业务层按角色过滤
                    .route(web::get().to(list_classrooms))
                    // 创建 - 仅教师和管理员，业务层判定
                    .route(web::post().to(create_classroom)),
            )
            // 学生按教室代码加入
            .service(web::resource("/enroll").route(web::post().to(enroll)))
            .service(
                web::resource("/{classroom_id}")
                    // 详情 - 权限失败伪装为 404
                    .route(web::get().to(get_classroom))
                    .route(web::put().to(update_classroom))
                    .route(web::delete().to(delete_classroom)),
            ),
    );
}
