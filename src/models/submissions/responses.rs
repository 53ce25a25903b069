use serde::Serialize;

use super::entities::{Submission, SubmissionFile, SubmissionStatus};
use crate::models::assignments::entities::Assignment;
use crate::models::users::responses::UserSummary;

/// 提交响应中的附件信息
#[derive(Debug, Serialize)]
pub struct SubmissionFileInfo {
    pub id: i64,
    pub file_name: String,
    pub file_size: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<&SubmissionFile> for SubmissionFileInfo {
    fn from(file: &SubmissionFile) -> Self {
        Self {
            id: file.id,
            file_name: file.file_name.clone(),
            file_size: file.file_size,
            uploaded_at: file.uploaded_at,
        }
    }
}

/// 提交记录响应
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub id: i64,
    pub assignment_id: i64,
    pub student: UserSummary,
    pub status: SubmissionStatus,
    pub submission_time: chrono::DateTime<chrono::Utc>,
    pub is_overdue: bool,
    pub files: Vec<SubmissionFileInfo>,
}

impl SubmissionResponse {
    pub fn new(
        submission: &Submission,
        student: UserSummary,
        assignment: &Assignment,
        files: &[SubmissionFile],
    ) -> Self {
        Self {
            id: submission.id,
            assignment_id: submission.assignment_id,
            student,
            status: submission.status,
            submission_time: submission.submission_time,
            is_overdue: is_overdue(submission, assignment),
            files: files.iter().map(SubmissionFileInfo::from).collect(),
        }
    }
}

/// 提交时间晚于作业截止日期当天末尾则视为逾期
fn is_overdue(submission: &Submission, assignment: &Assignment) -> bool {
    match assignment.due_date {
        Some(due) => submission.submission_time.date_naive() > due,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentStatus;
    use crate::models::users::entities::UserRole;

    fn assignment(due: Option<chrono::NaiveDate>) -> Assignment {
        Assignment {
            id: 1,
            classroom_id: 1,
            name: "HW".to_string(),
            description: None,
            due_date: due,
            score: None,
            status: AssignmentStatus::Published,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn submission(time: chrono::DateTime<chrono::Utc>) -> Submission {
        Submission {
            id: 1,
            assignment_id: 1,
            student_id: 2,
            status: SubmissionStatus::Submitted,
            submission_time: time,
        }
    }

    #[test]
    fn test_overdue_flag() {
        let due = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let on_time = chrono::DateTime::parse_from_rfc3339("2026-01-10T23:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let late = chrono::DateTime::parse_from_rfc3339("2026-01-11T01:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);

        assert!(!is_overdue(&submission(on_time), &assignment(Some(due))));
        assert!(is_overdue(&submission(late), &assignment(Some(due))));
        assert!(!is_overdue(&submission(late), &assignment(None)));
    }

    #[test]
    fn test_response_embeds_student_summary_without_password() {
        let student = UserSummary {
            id: 2,
            username: "stu".to_string(),
            profile_name: None,
            role: UserRole::Student,
        };
        let response = SubmissionResponse::new(
            &submission(chrono::Utc::now()),
            student,
            &assignment(None),
            &[],
        );
        let value = serde_json::to_value(response).unwrap();
        assert!(value["student"].get("password_hash").is_none());
        assert_eq!(value["files"], serde_json::json!([]));
    }
}
