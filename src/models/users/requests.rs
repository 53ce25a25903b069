use serde::Deserialize;

use super::entities::UserRole;

// 创建用户请求（注册与管理员播种共用）
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub profile_name: Option<String>,
    pub gender: Option<String>,
    pub avatar_url: Option<String>,
}

fn default_role() -> UserRole {
    UserRole::Unspecified
}

// 更新个人资料请求
//
// 用户名、邮箱、角色在创建后不可通过此路径修改。
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
    pub gender: Option<String>,
    pub avatar_url: Option<String>,
}
