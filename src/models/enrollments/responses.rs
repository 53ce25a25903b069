use serde::Serialize;

use super::entities::Enrollment;
use crate::models::PaginationInfo;
use crate::models::users::responses::UserSummary;

/// 选课名单项（教师/管理员视角）
#[derive(Debug, Serialize)]
pub struct EnrollmentListItem {
    pub id: i64,
    pub student: UserSummary,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}

impl EnrollmentListItem {
    pub fn new(enrollment: &Enrollment, student: UserSummary) -> Self {
        Self {
            id: enrollment.id,
            student,
            date_joined: enrollment.date_joined,
        }
    }
}

/// 选课名单分页响应
#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub items: Vec<EnrollmentListItem>,
    pub pagination: PaginationInfo,
}

/// 选课成功响应
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub classroom_id: i64,
    pub classroom_name: String,
    pub date_joined: chrono::DateTime<chrono::Utc>,
}
