use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::entities::AssignmentStatus;
use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub score: Option<i32>,
    #[serde(default = "default_status")]
    pub status: AssignmentStatus,
}

fn default_status() -> AssignmentStatus {
    AssignmentStatus::Draft
}

/// 更新作业请求
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub score: Option<i32>,
    pub status: Option<AssignmentStatus>,
}

/// 作业列表查询参数
///
/// ordering 支持 due_date/score/status/created_at，`-` 前缀表示倒序。
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

/// 写入时的字段校验：分数 0..=100，截止日期不早于今天
///
/// 失败时返回按字段组织的错误明细，直接放进响应信封的 errors 字段。
pub fn validate_assignment_fields(
    score: Option<i32>,
    due_date: Option<NaiveDate>,
) -> Result<(), serde_json::Value> {
    let mut errors = serde_json::Map::new();

    if let Some(score) = score
        && !(0..=100).contains(&score)
    {
        errors.insert(
            "score".to_string(),
            json!("Score must be between 0 and 100"),
        );
    }

    if let Some(due_date) = due_date
        && due_date < chrono::Utc::now().date_naive()
    {
        errors.insert(
            "due_date".to_string(),
            json!("Due date cannot be in the past"),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(serde_json::Value::Object(errors))
    }
}

impl CreateAssignmentRequest {
    pub fn validate(&self) -> Result<(), serde_json::Value> {
        validate_assignment_fields(self.score, self.due_date)
    }
}

impl UpdateAssignmentRequest {
    pub fn validate(&self) -> Result<(), serde_json::Value> {
        validate_assignment_fields(self.score, self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(validate_assignment_fields(Some(0), None).is_ok());
        assert!(validate_assignment_fields(Some(100), None).is_ok());
        assert!(validate_assignment_fields(Some(-1), None).is_err());
        assert!(validate_assignment_fields(Some(101), None).is_err());
        assert!(validate_assignment_fields(None, None).is_ok());
    }

    #[test]
    fn test_due_date_not_in_past() {
        let today = chrono::Utc::now().date_naive();
        assert!(validate_assignment_fields(None, Some(today)).is_ok());
        assert!(validate_assignment_fields(None, Some(today - chrono::Days::new(1))).is_err());
        assert!(validate_assignment_fields(None, Some(today + chrono::Days::new(7))).is_ok());
    }

    #[test]
    fn test_error_details_are_per_field() {
        let today = chrono::Utc::now().date_naive();
        let errors =
            validate_assignment_fields(Some(200), Some(today - chrono::Days::new(1))).unwrap_err();
        assert!(errors.get("score").is_some());
        assert!(errors.get("due_date").is_some());
    }
}
