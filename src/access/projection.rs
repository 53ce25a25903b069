//! 响应投影选择
//!
//! (角色, 是否超级用户, 视图种类) 的纯函数，决定每种资源用哪种
//! 序列化形状。具体形状结构体定义在 `models::*::responses` 中，
//! 这里只负责选择：管理员始终拿教师形状。

use super::predicates::Actor;
use crate::models::users::entities::UserRole;

/// 视图种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    List,
    Detail,
}

/// 投影角色
///
/// `Default` 对应未指定角色的用户：列表为空集，详情被作用域挡住，
/// 正常情况下不会走到序列化，但投影函数仍给出一个保守形状。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionRole {
    Teacher,
    Student,
    Default,
}

impl ProjectionRole {
    pub fn for_actor(actor: &Actor) -> Self {
        if actor.is_superuser {
            return ProjectionRole::Teacher;
        }
        match actor.role {
            UserRole::Teacher => ProjectionRole::Teacher,
            UserRole::Student => ProjectionRole::Student,
            UserRole::Unspecified => ProjectionRole::Default,
        }
    }

    /// 教室加入代码只出现在教师/管理员的详情形状上
    pub fn sees_classroom_code(&self, view: ViewKind) -> bool {
        matches!((self, view), (ProjectionRole::Teacher, ViewKind::Detail))
    }

    /// 作业的状态/分数/时间戳字段只对教师/管理员可见
    pub fn sees_assignment_internals(&self) -> bool {
        matches!(self, ProjectionRole::Teacher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: UserRole, is_superuser: bool) -> Actor {
        Actor {
            id: 7,
            role,
            is_superuser,
        }
    }

    #[test]
    fn test_admin_gets_teacher_shapes() {
        assert_eq!(
            ProjectionRole::for_actor(&actor(UserRole::Unspecified, true)),
            ProjectionRole::Teacher
        );
        assert_eq!(
            ProjectionRole::for_actor(&actor(UserRole::Student, true)),
            ProjectionRole::Teacher
        );
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(
            ProjectionRole::for_actor(&actor(UserRole::Teacher, false)),
            ProjectionRole::Teacher
        );
        assert_eq!(
            ProjectionRole::for_actor(&actor(UserRole::Student, false)),
            ProjectionRole::Student
        );
        assert_eq!(
            ProjectionRole::for_actor(&actor(UserRole::Unspecified, false)),
            ProjectionRole::Default
        );
    }

    #[test]
    fn test_classroom_code_only_on_teacher_detail() {
        assert!(ProjectionRole::Teacher.sees_classroom_code(ViewKind::Detail));
        assert!(!ProjectionRole::Teacher.sees_classroom_code(ViewKind::List));
        assert!(!ProjectionRole::Student.sees_classroom_code(ViewKind::Detail));
        assert!(!ProjectionRole::Default.sees_classroom_code(ViewKind::Detail));
    }

    #[test]
    fn test_assignment_internals_hidden_from_students() {
        assert!(ProjectionRole::Teacher.sees_assignment_internals());
        assert!(!ProjectionRole::Student.sees_assignment_internals());
        assert!(!ProjectionRole::Default.sees_assignment_internals());
    }
}
