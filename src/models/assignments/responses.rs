use serde::Serialize;

use super::entities::{Assignment, AssignmentStatus};
use crate::access::ProjectionRole;
use crate::models::common::pagination::PaginationInfo;

/// 教师/管理员的作业列表项
#[derive(Debug, Serialize)]
pub struct TeacherAssignmentListItem {
    pub id: i64,
    pub name: String,
    pub due_date: Option<chrono::NaiveDate>,
    pub status: AssignmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 学生的作业列表项，只含 id、名称、截止日期
#[derive(Debug, Serialize)]
pub struct StudentAssignmentListItem {
    pub id: i64,
    pub name: String,
    pub due_date: Option<chrono::NaiveDate>,
}

/// 按角色投影的列表项
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AssignmentListItem {
    Teacher(TeacherAssignmentListItem),
    Student(StudentAssignmentListItem),
}

impl AssignmentListItem {
    pub fn project(assignment: &Assignment, role: ProjectionRole) -> Self {
        if role.sees_assignment_internals() {
            AssignmentListItem::Teacher(TeacherAssignmentListItem {
                id: assignment.id,
                name: assignment.name.clone(),
                due_date: assignment.due_date,
                status: assignment.status,
                created_at: assignment.created_at,
            })
        } else {
            AssignmentListItem::Student(StudentAssignmentListItem {
                id: assignment.id,
                name: assignment.name.clone(),
                due_date: assignment.due_date,
            })
        }
    }
}

/// 作业详情，状态与时间戳仅对教师/管理员可见
#[derive(Debug, Serialize)]
pub struct AssignmentDetail {
    pub id: i64,
    pub classroom_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<chrono::NaiveDate>,
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl AssignmentDetail {
    pub fn project(assignment: &Assignment, role: ProjectionRole) -> Self {
        let internals = role.sees_assignment_internals();
        Self {
            id: assignment.id,
            classroom_id: assignment.classroom_id,
            name: assignment.name.clone(),
            description: assignment.description.clone(),
            due_date: assignment.due_date,
            score: assignment.score,
            status: internals.then_some(assignment.status),
            created_at: internals.then_some(assignment.created_at),
            updated_at: internals.then_some(assignment.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssignmentListResponse {
    pub items: Vec<AssignmentListItem>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assignment {
        Assignment {
            id: 11,
            classroom_id: 3,
            name: "Essay".to_string(),
            description: Some("Write an essay".to_string()),
            due_date: Some(chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
            score: Some(100),
            status: AssignmentStatus::Published,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_student_list_shape_is_exactly_three_fields() {
        let item = AssignmentListItem::project(&sample(), ProjectionRole::Student);
        let value = serde_json::to_value(item).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("name"));
        assert!(obj.contains_key("due_date"));
    }

    #[test]
    fn test_teacher_list_shape_carries_status() {
        let item = AssignmentListItem::project(&sample(), ProjectionRole::Teacher);
        let value = serde_json::to_value(item).unwrap();
        assert_eq!(value["status"], serde_json::json!("published"));
        assert!(value.get("created_at").is_some());
    }

    #[test]
    fn test_student_detail_hides_internals() {
        let detail = AssignmentDetail::project(&sample(), ProjectionRole::Student);
        let value = serde_json::to_value(detail).unwrap();
        assert!(value.get("status").is_none());
        assert!(value.get("created_at").is_none());
        assert!(value.get("updated_at").is_none());
        assert_eq!(value["description"], serde_json::json!("Write an essay"));
    }
}
