//! 业务服务层
//!
//! 每个资源一个 Service，按动作拆分文件。所有涉及教室作用域的
//! 动作先通过 storage 解析归属关系，再交给 access 模块判定。

pub mod assignments;
pub mod auth;
pub mod classrooms;
pub mod enrollments;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classrooms::ClassroomService;
pub use enrollments::EnrollmentService;
pub use submissions::SubmissionService;

use actix_web::HttpResponse;

use crate::access::Decision;
use crate::models::ApiResponse;

/// 把判定结果翻译为提前返回的错误响应
///
/// Allow 返回 None；Forbid 返回 403；MaskAsNotFound 返回 404，
/// 与资源真实不存在时的响应不可区分。
pub(crate) fn decision_error(decision: Decision, masked_resource: &str) -> Option<HttpResponse> {
    match decision {
        Decision::Allow => None,
        Decision::Forbid => Some(
            HttpResponse::Forbidden()
                .json(ApiResponse::error_empty("Permission denied")),
        ),
        Decision::MaskAsNotFound => Some(
            HttpResponse::NotFound()
                .json(ApiResponse::error_empty(format!("{masked_resource} not found"))),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_passes_through() {
        assert!(decision_error(Decision::Allow, "Classroom").is_none());
    }

    #[test]
    fn test_masked_denial_matches_missing_resource_status() {
        let masked = decision_error(Decision::MaskAsNotFound, "Classroom").unwrap();
        assert_eq!(masked.status(), actix_web::http::StatusCode::NOT_FOUND);

        let forbidden = decision_error(Decision::Forbid, "Classroom").unwrap();
        assert_eq!(forbidden.status(), actix_web::http::StatusCode::FORBIDDEN);
    }
}
