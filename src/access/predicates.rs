//! 动作级权限谓词
//!
//! 谓词是 (Actor, ClassroomTies) 上的纯函数，通过 any_of/all_of 组合，
//! 与数据库无关：教室归属关系由 storage 层先行解析为 ClassroomTies。

use crate::models::users::entities::{User, UserRole};

/// 经过认证的调用者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: UserRole,
    pub is_superuser: bool,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
            is_superuser: user.is_superuser,
        }
    }
}

/// 调用者与作用域教室的归属关系，每个请求由 storage 解析一次
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassroomTies {
    pub owns_classroom: bool,
    pub enrolled: bool,
}

impl ClassroomTies {
    /// 无作用域教室的动作（如教室创建、按代码选课）使用空归属
    pub const NONE: ClassroomTies = ClassroomTies {
        owns_classroom: false,
        enrolled: false,
    };
}

/// 权限谓词
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    IsAdmin,
    IsTeacher,
    IsStudent,
    IsTeacherOfThisClassroom,
    IsStudentOfThisClassroom,
}

impl Predicate {
    pub fn eval(&self, actor: &Actor, ties: &ClassroomTies) -> bool {
        match self {
            Predicate::IsAdmin => actor.is_superuser,
            Predicate::IsTeacher => actor.role == UserRole::Teacher,
            Predicate::IsStudent => actor.role == UserRole::Student,
            Predicate::IsTeacherOfThisClassroom => ties.owns_classroom,
            Predicate::IsStudentOfThisClassroom => ties.enrolled,
        }
    }
}

/// 谓词组合规则（短路求值，无副作用）
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    AnyOf(&'static [Predicate]),
    AllOf(&'static [Predicate]),
}

impl Rule {
    pub fn eval(&self, actor: &Actor, ties: &ClassroomTies) -> bool {
        match self {
            Rule::AnyOf(preds) => preds.iter().any(|p| p.eval(actor, ties)),
            Rule::AllOf(preds) => preds.iter().all(|p| p.eval(actor, ties)),
        }
    }
}

/// 受控动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ClassroomCreate,
    ClassroomRead,
    ClassroomUpdate,
    ClassroomDelete,
    AssignmentCreate,
    AssignmentRead,
    AssignmentUpdate,
    AssignmentDelete,
    EnrollmentCreate,
    EnrollmentList,
    SubmissionCreate,
    SubmissionUpdate,
    SubmissionDelete,
    SubmissionList,
}

/// 判定结果
///
/// MaskAsNotFound 用于带作用域的读取/修改路径：权限失败时返回 404，
/// 避免向无权限的调用者确认资源是否存在。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbid,
    MaskAsNotFound,
}

use Predicate::*;

impl Action {
    /// 动作对应的组合规则
    pub fn rule(&self) -> Rule {
        match self {
            Action::ClassroomCreate => Rule::AnyOf(&[IsTeacher, IsAdmin]),
            Action::ClassroomRead => {
                Rule::AnyOf(&[IsTeacherOfThisClassroom, IsStudentOfThisClassroom, IsAdmin])
            }
            Action::ClassroomUpdate | Action::ClassroomDelete => {
                Rule::AnyOf(&[IsTeacherOfThisClassroom, IsAdmin])
            }
            Action::AssignmentCreate | Action::AssignmentUpdate | Action::AssignmentDelete => {
                Rule::AnyOf(&[IsTeacherOfThisClassroom, IsAdmin])
            }
            Action::AssignmentRead => {
                Rule::AnyOf(&[IsTeacherOfThisClassroom, IsStudentOfThisClassroom, IsAdmin])
            }
            Action::EnrollmentCreate => Rule::AllOf(&[IsStudent]),
            Action::EnrollmentList => Rule::AnyOf(&[IsTeacherOfThisClassroom, IsAdmin]),
            Action::SubmissionCreate | Action::SubmissionUpdate | Action::SubmissionDelete => {
                Rule::AnyOf(&[IsStudentOfThisClassroom, IsAdmin])
            }
            // 任何已认证用户都可列出提交，可见行完全由 scoping 决定（空规则恒真）
            Action::SubmissionList => Rule::AllOf(&[]),
        }
    }

    /// 权限失败时是否伪装为 404
    ///
    /// 教室详情/更新/删除与作业详情同时用谓词过滤查询集，
    /// 为避免泄露资源存在性，失败时按 404 处理；其余路径返回真实 403。
    fn masks_denial(&self) -> bool {
        matches!(
            self,
            Action::ClassroomRead
                | Action::ClassroomUpdate
                | Action::ClassroomDelete
                | Action::AssignmentRead
        )
    }

    /// 动作判定入口
    pub fn check(&self, actor: &Actor, ties: &ClassroomTies) -> Decision {
        if self.rule().eval(actor, ties) {
            Decision::Allow
        } else if self.masks_denial() {
            Decision::MaskAsNotFound
        } else {
            Decision::Forbid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Actor {
        Actor {
            id: 1,
            role: UserRole::Teacher,
            is_superuser: false,
        }
    }

    fn student() -> Actor {
        Actor {
            id: 2,
            role: UserRole::Student,
            is_superuser: false,
        }
    }

    fn admin() -> Actor {
        Actor {
            id: 3,
            role: UserRole::Unspecified,
            is_superuser: true,
        }
    }

    fn unspecified() -> Actor {
        Actor {
            id: 4,
            role: UserRole::Unspecified,
            is_superuser: false,
        }
    }

    const OWNER: ClassroomTies = ClassroomTies {
        owns_classroom: true,
        enrolled: false,
    };
    const ENROLLED: ClassroomTies = ClassroomTies {
        owns_classroom: false,
        enrolled: true,
    };

    #[test]
    fn test_classroom_create_rule() {
        let action = Action::ClassroomCreate;
        assert_eq!(action.check(&teacher(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(
            action.check(&student(), &ClassroomTies::NONE),
            Decision::Forbid
        );
        assert_eq!(
            action.check(&unspecified(), &ClassroomTies::NONE),
            Decision::Forbid
        );
    }

    #[test]
    fn test_classroom_read_allows_enrolled_student() {
        let action = Action::ClassroomRead;
        assert_eq!(action.check(&teacher(), &OWNER), Decision::Allow);
        assert_eq!(action.check(&student(), &ENROLLED), Decision::Allow);
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
    }

    #[test]
    fn test_classroom_update_excludes_enrolled_student() {
        // 选课学生可读教室，但不可更新/删除
        for action in [Action::ClassroomUpdate, Action::ClassroomDelete] {
            assert_eq!(action.check(&teacher(), &OWNER), Decision::Allow);
            assert_eq!(action.check(&student(), &ENROLLED), Decision::MaskAsNotFound);
        }
    }

    #[test]
    fn test_scoped_denials_are_masked_as_not_found() {
        // 带作用域的读路径权限失败时不暴露资源存在性
        for action in [
            Action::ClassroomRead,
            Action::ClassroomUpdate,
            Action::ClassroomDelete,
            Action::AssignmentRead,
        ] {
            assert_eq!(
                action.check(&student(), &ClassroomTies::NONE),
                Decision::MaskAsNotFound
            );
        }
    }

    #[test]
    fn test_unscoped_denials_are_genuine_forbidden() {
        for action in [
            Action::ClassroomCreate,
            Action::AssignmentCreate,
            Action::AssignmentUpdate,
            Action::AssignmentDelete,
            Action::EnrollmentCreate,
            Action::EnrollmentList,
            Action::SubmissionCreate,
        ] {
            assert_eq!(
                action.check(&unspecified(), &ClassroomTies::NONE),
                Decision::Forbid
            );
        }
    }

    #[test]
    fn test_assignment_write_requires_classroom_ownership() {
        let other_teacher = Actor {
            id: 9,
            role: UserRole::Teacher,
            is_superuser: false,
        };
        for action in [
            Action::AssignmentCreate,
            Action::AssignmentUpdate,
            Action::AssignmentDelete,
        ] {
            assert_eq!(action.check(&teacher(), &OWNER), Decision::Allow);
            // 教师身份本身不够，必须是该教室的教师
            assert_eq!(
                action.check(&other_teacher, &ClassroomTies::NONE),
                Decision::Forbid
            );
            assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
        }
    }

    #[test]
    fn test_enrollment_create_student_only() {
        let action = Action::EnrollmentCreate;
        assert_eq!(action.check(&student(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(
            action.check(&teacher(), &ClassroomTies::NONE),
            Decision::Forbid
        );
        // 管理员也不能以学生身份选课
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Forbid);
    }

    #[test]
    fn test_enrollment_list_teacher_of_classroom_or_admin() {
        let action = Action::EnrollmentList;
        assert_eq!(action.check(&teacher(), &OWNER), Decision::Allow);
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(action.check(&student(), &ENROLLED), Decision::Forbid);
    }

    #[test]
    fn test_submission_create_requires_enrollment() {
        let action = Action::SubmissionCreate;
        assert_eq!(action.check(&student(), &ENROLLED), Decision::Allow);
        assert_eq!(
            action.check(&student(), &ClassroomTies::NONE),
            Decision::Forbid
        );
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
    }

    #[test]
    fn test_submission_list_any_authenticated_role() {
        let action = Action::SubmissionList;
        assert_eq!(action.check(&teacher(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(action.check(&student(), &ClassroomTies::NONE), Decision::Allow);
        assert_eq!(action.check(&admin(), &ClassroomTies::NONE), Decision::Allow);
        // 未指定角色的用户也放行，scoping 给出空可见集合而不是错误
        assert_eq!(
            action.check(&unspecified(), &ClassroomTies::NONE),
            Decision::Allow
        );
    }

    #[test]
    fn test_rule_combinators_short_circuit_semantics() {
        let any = Rule::AnyOf(&[Predicate::IsAdmin, Predicate::IsTeacher]);
        assert!(any.eval(&teacher(), &ClassroomTies::NONE));
        assert!(!any.eval(&student(), &ClassroomTies::NONE));

        let all = Rule::AllOf(&[Predicate::IsStudent, Predicate::IsStudentOfThisClassroom]);
        assert!(all.eval(&student(), &ENROLLED));
        assert!(!all.eval(&student(), &ClassroomTies::NONE));
    }
}
