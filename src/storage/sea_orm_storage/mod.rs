//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod classrooms;
mod enrollments;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{ClasstrackError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClasstrackError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClasstrackError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClasstrackError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClasstrackError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest, password_hash: String) -> Result<User> {
        self.create_user_impl(user, password_hash).await
    }

    async fn create_superuser(
        &self,
        user: CreateUserRequest,
        password_hash: String,
    ) -> Result<User> {
        self.create_superuser_impl(user, password_hash).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_profile(&self, id: i64, update: UpdateProfileRequest) -> Result<Option<User>> {
        self.update_profile_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 教室模块
    async fn create_classroom(
        &self,
        teacher_id: i64,
        classroom: CreateClassroomRequest,
    ) -> Result<Classroom> {
        self.create_classroom_impl(teacher_id, classroom).await
    }

    async fn get_classroom_by_id(&self, classroom_id: i64) -> Result<Option<Classroom>> {
        self.get_classroom_by_id_impl(classroom_id).await
    }

    async fn get_classroom_by_code(&self, classroom_code: &str) -> Result<Option<Classroom>> {
        self.get_classroom_by_code_impl(classroom_code).await
    }

    async fn list_classrooms_with_pagination(
        &self,
        scope: scoping::ClassroomVisibility,
        query: ClassroomListParams,
    ) -> Result<(Vec<Classroom>, PaginationInfo)> {
        self.list_classrooms_with_pagination_impl(scope, query).await
    }

    async fn update_classroom(
        &self,
        classroom_id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(classroom_id, update).await
    }

    async fn delete_classroom(&self, classroom_id: i64) -> Result<bool> {
        self.delete_classroom_impl(classroom_id).await
    }

    async fn resolve_classroom_ties(
        &self,
        user_id: i64,
        classroom_id: i64,
    ) -> Result<ClassroomTies> {
        self.resolve_classroom_ties_impl(user_id, classroom_id).await
    }

    // 选课模块
    async fn enroll_student(&self, classroom_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(classroom_id, student_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<(Vec<(Enrollment, User)>, PaginationInfo)> {
        self.list_enrollments_with_pagination_impl(classroom_id, page, size)
            .await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        classroom_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(classroom_id, assignment).await
    }

    async fn get_assignment_in_classroom(
        &self,
        classroom_id: i64,
        assignment_id: i64,
        scope: scoping::AssignmentVisibility,
    ) -> Result<Option<Assignment>> {
        self.get_assignment_in_classroom_impl(classroom_id, assignment_id, scope)
            .await
    }

    async fn list_assignments_with_pagination(
        &self,
        classroom_id: i64,
        scope: scoping::AssignmentVisibility,
        query: AssignmentListParams,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        self.list_assignments_with_pagination_impl(classroom_id, scope, query)
            .await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn list_submissions(
        &self,
        assignment_id: i64,
        scope: scoping::SubmissionVisibility,
        query: SubmissionListParams,
    ) -> Result<Vec<(Submission, User, Vec<SubmissionFile>)>> {
        self.list_submissions_impl(assignment_id, scope, query).await
    }

    async fn get_submission_for_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_for_student_impl(assignment_id, student_id)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_or_create_draft_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Submission> {
        self.get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
    }

    async fn add_submission_file(
        &self,
        submission_id: i64,
        file_name: &str,
        file_path: &str,
        file_size: i64,
    ) -> Result<SubmissionFile> {
        self.add_submission_file_impl(submission_id, file_name, file_path, file_size)
            .await
    }

    async fn finalize_submission(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.finalize_submission_impl(submission_id).await
    }

    async fn list_submission_files(&self, submission_id: i64) -> Result<Vec<SubmissionFile>> {
        self.list_submission_files_impl(submission_id).await
    }

    async fn delete_submission(&self, submission_id: i64) -> Result<bool> {
        self.delete_submission_impl(submission_id).await
    }
}
