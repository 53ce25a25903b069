//! 行级可见性规则
//!
//! 每个资源一张「角色 → 可见集合」的映射表，storage 层把可见集合
//! 翻译成查询过滤条件。规则本身不触库，便于穷举测试。

use super::predicates::Actor;
use crate::models::users::entities::UserRole;

/// 教室列表的可见集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassroomVisibility {
    /// 教师：自己创建的教室
    OwnedBy(i64),
    /// 学生：已选课的教室
    EnrolledBy(i64),
    /// 管理员：全部
    All,
    /// 未指定角色：空集
    Nothing,
}

/// 作业列表/详情的可见集合（教室内）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentVisibility {
    /// 教师/管理员：任何状态
    AnyStatus,
    /// 学生：仅已发布
    PublishedOnly,
    Nothing,
}

/// 提交列表的可见集合（作业内）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionVisibility {
    /// 教师/管理员：仅已提交的行
    SubmittedOnly,
    /// 学生：自己的行，不限状态
    OwnBy(i64),
    Nothing,
}

/// 教室列表作用域
pub fn classroom_scope(actor: &Actor) -> ClassroomVisibility {
    if actor.is_superuser {
        return ClassroomVisibility::All;
    }
    match actor.role {
        UserRole::Teacher => ClassroomVisibility::OwnedBy(actor.id),
        UserRole::Student => ClassroomVisibility::EnrolledBy(actor.id),
        UserRole::Unspecified => ClassroomVisibility::Nothing,
    }
}

/// 作业作用域，列表与详情共用
pub fn assignment_scope(actor: &Actor) -> AssignmentVisibility {
    if actor.is_superuser {
        return AssignmentVisibility::AnyStatus;
    }
    match actor.role {
        UserRole::Teacher => AssignmentVisibility::AnyStatus,
        UserRole::Student => AssignmentVisibility::PublishedOnly,
        UserRole::Unspecified => AssignmentVisibility::Nothing,
    }
}

/// 提交列表作用域
pub fn submission_scope(actor: &Actor) -> SubmissionVisibility {
    if actor.is_superuser {
        return SubmissionVisibility::SubmittedOnly;
    }
    match actor.role {
        UserRole::Teacher => SubmissionVisibility::SubmittedOnly,
        UserRole::Student => SubmissionVisibility::OwnBy(actor.id),
        UserRole::Unspecified => SubmissionVisibility::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: UserRole, is_superuser: bool) -> Actor {
        Actor {
            id: 42,
            role,
            is_superuser,
        }
    }

    #[test]
    fn test_classroom_scope_table() {
        assert_eq!(
            classroom_scope(&actor(UserRole::Teacher, false)),
            ClassroomVisibility::OwnedBy(42)
        );
        assert_eq!(
            classroom_scope(&actor(UserRole::Student, false)),
            ClassroomVisibility::EnrolledBy(42)
        );
        assert_eq!(
            classroom_scope(&actor(UserRole::Unspecified, true)),
            ClassroomVisibility::All
        );
        assert_eq!(
            classroom_scope(&actor(UserRole::Unspecified, false)),
            ClassroomVisibility::Nothing
        );
    }

    #[test]
    fn test_superuser_overrides_role_scope() {
        // 带教师/学生角色的超级用户也按管理员作用域处理
        assert_eq!(
            classroom_scope(&actor(UserRole::Student, true)),
            ClassroomVisibility::All
        );
        assert_eq!(
            assignment_scope(&actor(UserRole::Student, true)),
            AssignmentVisibility::AnyStatus
        );
    }

    #[test]
    fn test_assignment_scope_table() {
        assert_eq!(
            assignment_scope(&actor(UserRole::Teacher, false)),
            AssignmentVisibility::AnyStatus
        );
        assert_eq!(
            assignment_scope(&actor(UserRole::Student, false)),
            AssignmentVisibility::PublishedOnly
        );
        assert_eq!(
            assignment_scope(&actor(UserRole::Unspecified, false)),
            AssignmentVisibility::Nothing
        );
    }

    #[test]
    fn test_submission_scope_table() {
        assert_eq!(
            submission_scope(&actor(UserRole::Teacher, false)),
            SubmissionVisibility::SubmittedOnly
        );
        assert_eq!(
            submission_scope(&actor(UserRole::Student, false)),
            SubmissionVisibility::OwnBy(42)
        );
        assert_eq!(
            submission_scope(&actor(UserRole::Unspecified, false)),
            SubmissionVisibility::Nothing
        );
        assert_eq!(
            submission_scope(&actor(UserRole::Unspecified, true)),
            SubmissionVisibility::SubmittedOnly
        );
    }
}
