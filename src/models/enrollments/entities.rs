use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    // 选课记录ID
    pub id: i64,
    // 教室ID
    pub classroom_id: i64,
    // 学生ID
    pub student_id: i64,
    // 加入时间
    pub date_joined: chrono::DateTime<chrono::Utc>,
}
