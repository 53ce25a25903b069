//! 业务数据模型定义
//!
//! 与 entity 模块的数据库实体分离：storage 层负责两者之间的转换。

pub mod common;

pub mod assignments;
pub mod auth;
pub mod classrooms;
pub mod enrollments;
pub mod submissions;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
