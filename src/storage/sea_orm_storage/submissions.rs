//! 提交存储操作

use super::SeaOrmStorage;
use crate::access::scoping::SubmissionVisibility;
use crate::entity::submission_files;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users;
use crate::errors::{ClasstrackError, Result};
use crate::models::{
    submissions::{
        entities::{Submission, SubmissionFile, SubmissionStatus},
        requests::SubmissionListParams,
    },
    users::entities::User,
};
use crate::utils::{escape_like_pattern, parse_ordering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 按可见集合列出作业下的提交
    ///
    /// 列出前先清理无附件的草稿占位行，它们是上传中断留下的垃圾。
    pub async fn list_submissions_impl(
        &self,
        assignment_id: i64,
        scope: SubmissionVisibility,
        query: SubmissionListParams,
    ) -> Result<Vec<(Submission, User, Vec<SubmissionFile>)>> {
        self.prune_empty_draft_submissions_impl(assignment_id).await?;

        let mut select = Submissions::find()
            .find_also_related(users::Entity)
            .filter(Column::AssignmentId.eq(assignment_id));

        match scope {
            SubmissionVisibility::SubmittedOnly => {
                select = select.filter(Column::Status.eq(SubmissionStatus::SUBMITTED));
            }
            SubmissionVisibility::OwnBy(student_id) => {
                select = select.filter(Column::StudentId.eq(student_id));
            }
            SubmissionVisibility::Nothing => return Ok(Vec::new()),
        }

        // 搜索匹配提交学生的用户名或显示名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::Username.contains(&escaped))
                    .add(users::Column::ProfileName.contains(&escaped)),
            );
        }

        // 未知排序字段落回默认的提交时间倒序
        select = match parse_ordering(query.ordering.as_deref()) {
            Some(("submission_time", false)) => select.order_by_asc(Column::SubmissionTime),
            Some(("student", false)) => select.order_by_asc(users::Column::Username),
            Some(("student", true)) => select.order_by_desc(users::Column::Username),
            _ => select.order_by_desc(Column::SubmissionTime),
        };

        let rows = select
            .all(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询提交列表失败: {e}")))?;

        let mut result = Vec::with_capacity(rows.len());
        for (submission, student) in rows {
            let Some(student) = student else { continue };
            let files = self.list_submission_files_impl(submission.id).await?;
            result.push((submission.into_submission(), student.into_user(), files));
        }

        Ok(result)
    }

    /// 获取学生在作业下的提交记录
    pub async fn get_submission_for_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询提交记录失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 ID 获取提交记录
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询提交记录失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 取得或创建草稿提交
    ///
    /// (assignment_id, student_id) 的唯一约束保证每个学生至多一条记录：
    /// 并发下插入失败时改为读取已有行，不做先检查后写入。
    pub async fn get_or_create_draft_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Submission> {
        if let Some(existing) = self
            .get_submission_for_student_impl(assignment_id, student_id)
            .await?
        {
            return Ok(existing);
        }

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            status: Set(SubmissionStatus::Draft.to_string()),
            submission_time: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_submission()),
            // 唯一约束冲突按结构化错误识别，不依赖各后端的报错文案
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let existing = self
                    .get_submission_for_student_impl(assignment_id, student_id)
                    .await?;
                existing.ok_or_else(|| {
                    ClasstrackError::database_operation("提交记录在并发写入后消失")
                })
            }
            Err(e) => Err(ClasstrackError::database_operation(format!(
                "创建提交记录失败: {e}"
            ))),
        }
    }

    /// 记录提交附件
    pub async fn add_submission_file_impl(
        &self,
        submission_id: i64,
        file_name: &str,
        file_path: &str,
        file_size: i64,
    ) -> Result<SubmissionFile> {
        let model = submission_files::ActiveModel {
            submission_id: Set(submission_id),
            file_name: Set(file_name.to_string()),
            file_path: Set(file_path.to_string()),
            file_size: Set(file_size),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("记录提交附件失败: {e}")))?;

        Ok(result.into_submission_file())
    }

    /// 将提交置为已提交并刷新提交时间
    pub async fn finalize_submission_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let existing = self.get_submission_by_id_impl(submission_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(submission_id),
            status: Set(SubmissionStatus::Submitted.to_string()),
            submission_time: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("更新提交状态失败: {e}")))?;

        self.get_submission_by_id_impl(submission_id).await
    }

    /// 列出提交的附件
    pub async fn list_submission_files_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<SubmissionFile>> {
        let files = submission_files::Entity::find()
            .filter(submission_files::Column::SubmissionId.eq(submission_id))
            .order_by_asc(submission_files::Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询提交附件失败: {e}")))?;

        Ok(files.into_iter().map(|m| m.into_submission_file()).collect())
    }

    /// 删除提交，附件记录级联删除
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 清理无附件的草稿占位行
    pub async fn prune_empty_draft_submissions_impl(&self, assignment_id: i64) -> Result<u64> {
        let drafts = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::Status.eq(SubmissionStatus::DRAFT))
            .all(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询草稿提交失败: {e}")))?;

        let mut pruned = 0;
        for draft in drafts {
            let has_files = submission_files::Entity::find()
                .filter(submission_files::Column::SubmissionId.eq(draft.id))
                .one(&self.db)
                .await
                .map_err(|e| {
                    ClasstrackError::database_operation(format!("查询提交附件失败: {e}"))
                })?
                .is_some();

            if !has_files {
                let result = Submissions::delete_by_id(draft.id)
                    .exec(&self.db)
                    .await
                    .map_err(|e| {
                        ClasstrackError::database_operation(format!("清理草稿提交失败: {e}"))
                    })?;
                pruned += result.rows_affected;
            }
        }

        Ok(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentStatus;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::classrooms::requests::CreateClassroomRequest;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn memory_storage() -> SeaOrmStorage {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SeaOrmStorage { db }
    }

    fn user_request(username: &str, role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "secret".to_string(),
            role,
            profile_name: None,
            gender: None,
            avatar_url: None,
        }
    }

    async fn seed_student(storage: &SeaOrmStorage, username: &str) -> i64 {
        storage
            .create_user_impl(user_request(username, UserRole::Student), "hash".to_string())
            .await
            .unwrap()
            .id
    }

    async fn seed_assignment(storage: &SeaOrmStorage) -> i64 {
        let teacher = storage
            .create_user_impl(user_request("t01", UserRole::Teacher), "hash".to_string())
            .await
            .unwrap();
        let classroom = storage
            .create_classroom_impl(
                teacher.id,
                CreateClassroomRequest {
                    name: "Algebra".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        storage
            .create_assignment_impl(
                classroom.id,
                CreateAssignmentRequest {
                    name: "HW1".to_string(),
                    description: None,
                    due_date: None,
                    score: None,
                    status: AssignmentStatus::Published,
                },
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_draft_upsert_returns_same_row() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage).await;
        let student_id = seed_student(&storage, "s01").await;

        let first = storage
            .get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
            .unwrap();
        let second = storage
            .get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
            .unwrap();

        // 同一学生同一作业始终落在同一行上
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, SubmissionStatus::Draft);
    }

    #[tokio::test]
    async fn test_submission_stays_submitted_after_finalize() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage).await;
        let student_id = seed_student(&storage, "s01").await;

        let draft = storage
            .get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
            .unwrap();
        storage
            .add_submission_file_impl(draft.id, "essay.pdf", "submissions/x/essay.pdf", 10)
            .await
            .unwrap();
        let finalized = storage
            .finalize_submission_impl(draft.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(finalized.status, SubmissionStatus::Submitted);

        // 已提交的行不会被再次取草稿时覆盖，服务层据此拒绝重复提交
        let again = storage
            .get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
            .unwrap();
        assert_eq!(again.id, draft.id);
        assert_eq!(again.status, SubmissionStatus::Submitted);
    }

    #[tokio::test]
    async fn test_empty_draft_pruned_from_listing() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage).await;
        let student_id = seed_student(&storage, "s01").await;

        storage
            .get_or_create_draft_submission_impl(assignment_id, student_id)
            .await
            .unwrap();

        let rows = storage
            .list_submissions_impl(
                assignment_id,
                SubmissionVisibility::OwnBy(student_id),
                SubmissionListParams::default(),
            )
            .await
            .unwrap();
        assert!(rows.is_empty());

        // 占位行已被清理，学生可以重新开始上传
        let remaining = storage
            .get_submission_for_student_impl(assignment_id, student_id)
            .await
            .unwrap();
        assert!(remaining.is_none());
    }

    #[tokio::test]
    async fn test_submission_search_and_ordering_by_student() {
        let storage = memory_storage().await;
        let assignment_id = seed_assignment(&storage).await;
        let alice_id = seed_student(&storage, "alice").await;
        let bob_id = seed_student(&storage, "bob").await;

        for student_id in [alice_id, bob_id] {
            let draft = storage
                .get_or_create_draft_submission_impl(assignment_id, student_id)
                .await
                .unwrap();
            storage
                .add_submission_file_impl(draft.id, "essay.pdf", "submissions/x/essay.pdf", 10)
                .await
                .unwrap();
            storage.finalize_submission_impl(draft.id).await.unwrap();
        }

        let by_student = storage
            .list_submissions_impl(
                assignment_id,
                SubmissionVisibility::SubmittedOnly,
                SubmissionListParams {
                    ordering: Some("student".to_string()),
                    search: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_student[0].1.username, "alice");
        assert_eq!(by_student[1].1.username, "bob");

        let by_student_desc = storage
            .list_submissions_impl(
                assignment_id,
                SubmissionVisibility::SubmittedOnly,
                SubmissionListParams {
                    ordering: Some("-student".to_string()),
                    search: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(by_student_desc[0].1.username, "bob");

        let searched = storage
            .list_submissions_impl(
                assignment_id,
                SubmissionVisibility::SubmittedOnly,
                SubmissionListParams {
                    ordering: None,
                    search: Some("ali".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].1.username, "alice");
    }
}
