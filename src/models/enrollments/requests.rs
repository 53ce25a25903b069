use serde::Deserialize;

/// 按代码选课请求
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub classroom_code: String,
}
