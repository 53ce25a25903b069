use serde::Serialize;

use super::entities::{User, UserRole};

// 用户摘要（嵌入在选课、提交等响应中）
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub profile_name: Option<String>,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            profile_name: user.profile.profile_name.clone(),
            role: user.role,
        }
    }
}
