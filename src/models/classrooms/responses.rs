use serde::Serialize;

use super::entities::Classroom;
use crate::access::{ProjectionRole, ViewKind};
use crate::models::common::pagination::PaginationInfo;

/// 教室列表项，任何角色的列表形状都不含加入代码
#[derive(Debug, Serialize)]
pub struct ClassroomListItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Classroom> for ClassroomListItem {
    fn from(classroom: &Classroom) -> Self {
        Self {
            id: classroom.id,
            name: classroom.name.clone(),
            description: classroom.description.clone(),
            teacher_id: classroom.teacher_id,
            created_at: classroom.created_at,
        }
    }
}

/// 教室详情，加入代码仅在教师/管理员形状上出现
#[derive(Debug, Serialize)]
pub struct ClassroomDetail {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classroom_code: Option<String>,
    pub teacher_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ClassroomDetail {
    pub fn project(classroom: &Classroom, role: ProjectionRole) -> Self {
        let classroom_code = role
            .sees_classroom_code(ViewKind::Detail)
            .then(|| classroom.classroom_code.clone());
        Self {
            id: classroom.id,
            name: classroom.name.clone(),
            description: classroom.description.clone(),
            classroom_code,
            teacher_id: classroom.teacher_id,
            created_at: classroom.created_at,
            updated_at: classroom.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClassroomListResponse {
    pub items: Vec<ClassroomListItem>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Classroom {
        Classroom {
            id: 5,
            name: "Algebra".to_string(),
            description: Some("Linear algebra".to_string()),
            classroom_code: "Ab3xY9".to_string(),
            teacher_id: 2,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_list_item_never_carries_code() {
        let value = serde_json::to_value(ClassroomListItem::from(&sample())).unwrap();
        assert!(value.get("classroom_code").is_none());
    }

    #[test]
    fn test_detail_code_visibility_by_role() {
        let teacher =
            serde_json::to_value(ClassroomDetail::project(&sample(), ProjectionRole::Teacher))
                .unwrap();
        assert_eq!(teacher["classroom_code"], serde_json::json!("Ab3xY9"));

        let student =
            serde_json::to_value(ClassroomDetail::project(&sample(), ProjectionRole::Student))
                .unwrap();
        assert!(student.get("classroom_code").is_none());
    }
}
