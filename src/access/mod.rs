//! 访问控制与投影核心
//!
//! 所有端点的权限判定、行级可见性与响应投影选择都集中在这里：
//! - `predicates`: 动作级权限谓词与组合规则（含 403 伪装为 404 的路径）
//! - `scoping`: 角色到可见行集合的映射，storage 层据此构造查询过滤
//! - `projection`: 角色到序列化形状的映射
//!
//! 核心函数都显式接收 Actor 参数，不读取任何请求级环境状态。

pub mod predicates;
pub mod projection;
pub mod scoping;

pub use predicates::{Action, Actor, ClassroomTies, Decision, Predicate, Rule};
pub use projection::{ProjectionRole, ViewKind};
