use serde::Deserialize;

use crate::models::common::pagination::PaginationQuery;

/// 创建教室请求，加入代码由服务端生成
#[derive(Debug, Deserialize)]
pub struct CreateClassroomRequest {
    pub name: String,
    pub description: Option<String>,
}

/// 更新教室请求，代码与归属教师不可修改
#[derive(Debug, Deserialize)]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// 教室列表查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct ClassroomListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}
