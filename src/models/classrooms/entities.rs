use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    // 教室ID
    pub id: i64,
    // 教室名称
    pub name: String,
    // 教室描述
    pub description: Option<String>,
    // 加入代码（6位字母数字，创建时生成，全局唯一）
    pub classroom_code: String,
    // 教师ID
    pub teacher_id: i64,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
