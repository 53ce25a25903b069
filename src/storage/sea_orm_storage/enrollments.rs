//! 选课关系存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users;
use crate::errors::{ClasstrackError, Result};
use crate::models::{
    PaginationInfo, enrollments::entities::Enrollment, users::entities::User,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};

impl SeaOrmStorage {
    /// 学生加入教室，重复加入返回 Conflict
    ///
    /// 不做先查询后写入：(classroom_id, student_id) 的唯一约束是
    /// 重复判定的唯一依据，并发下也只放行一条。
    pub async fn enroll_student_impl(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<Enrollment> {
        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            student_id: Set(student_id),
            date_joined: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_enrollment()),
            // 唯一约束冲突按结构化错误识别，不依赖各后端的报错文案
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Err(
                ClasstrackError::conflict("Student is already enrolled in this classroom"),
            ),
            Err(e) => Err(ClasstrackError::database_operation(format!(
                "创建选课记录失败: {e}"
            ))),
        }
    }

    /// 分页列出教室的选课名单（带学生信息）
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<(Vec<(Enrollment, User)>, PaginationInfo)> {
        let page = page.unwrap_or(1).max(1) as u64;
        let size = size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Enrollments::find()
            .find_also_related(users::Entity)
            .filter(Column::ClassroomId.eq(classroom_id))
            .order_by_asc(Column::DateJoined);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            ClasstrackError::database_operation(format!("查询选课总数失败: {e}"))
        })?;

        let pages = paginator.num_pages().await.map_err(|e| {
            ClasstrackError::database_operation(format!("查询选课页数失败: {e}"))
        })?;

        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            ClasstrackError::database_operation(format!("查询选课名单失败: {e}"))
        })?;

        let items = rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                student.map(|s| (enrollment.into_enrollment(), s.into_user()))
            })
            .collect();

        Ok((
            items,
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    async fn seed_classroom_and_student(storage: &SeaOrmStorage) -> (i64, i64) {
        let teacher = storage
            .create_user_impl(user_request("t01", UserRole::Teacher), "hash".to_string())
            .await
            .unwrap();
        let student = storage
            .create_user_impl(user_request("s01", UserRole::Student), "hash".to_string())
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
        (classroom.id, student.id)
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_returns_conflict() {
        let storage = memory_storage().await;
        let (classroom_id, student_id) = seed_classroom_and_student(&storage).await;

        storage
            .enroll_student_impl(classroom_id, student_id)
            .await
            .unwrap();

        let err = storage
            .enroll_student_impl(classroom_id, student_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ClasstrackError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_enrollment_listed_with_student_info() {
        let storage = memory_storage().await;
        let (classroom_id, student_id) = seed_classroom_and_student(&storage).await;

        storage
            .enroll_student_impl(classroom_id, student_id)
            .await
            .unwrap();

        let (items, pagination) = storage
            .list_enrollments_with_pagination_impl(classroom_id, None, None)
            .await
            .unwrap();
        assert_eq!(pagination.total, 1);
        assert_eq!(items[0].0.student_id, student_id);
        assert_eq!(items[0].1.username, "s01");
    }
}
