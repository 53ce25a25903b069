use std::sync::Arc;

use crate::access::{ClassroomTies, scoping};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::Assignment,
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    classrooms::{
        entities::Classroom,
        requests::{ClassroomListParams, CreateClassroomRequest, UpdateClassroomRequest},
    },
    enrollments::entities::Enrollment,
    submissions::{
        entities::{Submission, SubmissionFile},
        requests::SubmissionListParams,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateProfileRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户，password_hash 由服务层生成
    async fn create_user(&self, user: CreateUserRequest, password_hash: String) -> Result<User>;
    // 创建超级用户（仅启动播种使用）
    async fn create_superuser(&self, user: CreateUserRequest, password_hash: String)
    -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新个人资料（用户名、邮箱、角色不可变）
    async fn update_profile(&self, id: i64, update: UpdateProfileRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量（管理员播种用）
    async fn count_users(&self) -> Result<u64>;

    /// 教室管理方法
    // 创建教室，加入代码由存储层生成并保证唯一
    async fn create_classroom(
        &self,
        teacher_id: i64,
        classroom: CreateClassroomRequest,
    ) -> Result<Classroom>;
    // 通过ID获取教室信息
    async fn get_classroom_by_id(&self, classroom_id: i64) -> Result<Option<Classroom>>;
    // 通过加入代码获取教室信息
    async fn get_classroom_by_code(&self, classroom_code: &str) -> Result<Option<Classroom>>;
    // 按可见集合分页列出教室
    async fn list_classrooms_with_pagination(
        &self,
        scope: scoping::ClassroomVisibility,
        query: ClassroomListParams,
    ) -> Result<(Vec<Classroom>, PaginationInfo)>;
    // 更新教室信息
    async fn update_classroom(
        &self,
        classroom_id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>>;
    // 删除教室（级联删除作业与选课记录）
    async fn delete_classroom(&self, classroom_id: i64) -> Result<bool>;
    // 解析调用者与教室的归属关系
    async fn resolve_classroom_ties(
        &self,
        user_id: i64,
        classroom_id: i64,
    ) -> Result<ClassroomTies>;

    /// 选课管理方法
    // 学生加入教室，重复加入返回 Conflict
    async fn enroll_student(&self, classroom_id: i64, student_id: i64) -> Result<Enrollment>;
    // 列出教室的选课名单（带学生信息）
    async fn list_enrollments_with_pagination(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<(Vec<(Enrollment, User)>, PaginationInfo)>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        classroom_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 获取教室内的作业，按可见集合过滤
    async fn get_assignment_in_classroom(
        &self,
        classroom_id: i64,
        assignment_id: i64,
        scope: scoping::AssignmentVisibility,
    ) -> Result<Option<Assignment>>;
    // 按可见集合分页列出教室内的作业
    async fn list_assignments_with_pagination(
        &self,
        classroom_id: i64,
        scope: scoping::AssignmentVisibility,
        query: AssignmentListParams,
    ) -> Result<(Vec<Assignment>, PaginationInfo)>;
    // 更新作业
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 按可见集合列出作业下的提交（带学生与附件信息），支持搜索与排序
    async fn list_submissions(
        &self,
        assignment_id: i64,
        scope: scoping::SubmissionVisibility,
        query: SubmissionListParams,
    ) -> Result<Vec<(Submission, User, Vec<SubmissionFile>)>>;
    // 获取学生在作业下的提交记录
    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 通过ID获取提交记录
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 取得或创建草稿提交（唯一约束兜底并发竞争）
    async fn get_or_create_draft_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Submission>;
    // 记录提交附件
    async fn add_submission_file(
        &self,
        submission_id: i64,
        file_name: &str,
        file_path: &str,
        file_size: i64,
    ) -> Result<SubmissionFile>;
    // 将提交置为已提交并刷新提交时间
    async fn finalize_submission(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 列出提交的附件
    async fn list_submission_files(&self, submission_id: i64) -> Result<Vec<SubmissionFile>>;
    // 删除提交（级联删除附件记录）
    async fn delete_submission(&self, submission_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
