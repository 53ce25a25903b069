use serde::Deserialize;

// 登录请求（用户名或邮箱均可）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
