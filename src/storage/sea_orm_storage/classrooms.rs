//! 教室存储操作

use super::SeaOrmStorage;
use crate::access::{ClassroomTies, scoping::ClassroomVisibility};
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms, Relation};
use crate::entity::enrollments;
use crate::errors::{ClasstrackError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::Classroom,
        requests::{ClassroomListParams, CreateClassroomRequest, UpdateClassroomRequest},
    },
};
use crate::utils::{escape_like_pattern, random_code::generate_classroom_code};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 创建教室，加入代码碰撞时重试，唯一约束兜底并发竞争
    pub async fn create_classroom_impl(
        &self,
        teacher_id: i64,
        req: CreateClassroomRequest,
    ) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();

        let classroom_code = loop {
            let candidate = generate_classroom_code();
            let taken = Classrooms::find()
                .filter(Column::ClassroomCode.eq(&candidate))
                .one(&self.db)
                .await
                .map_err(|e| {
                    ClasstrackError::database_operation(format!("查询教室代码失败: {e}"))
                })?;
            if taken.is_none() {
                break candidate;
            }
        };

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            name: Set(req.name),
            description: Set(req.description),
            classroom_code: Set(classroom_code),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("创建教室失败: {e}")))?;

        Ok(result.into_classroom())
    }

    /// 通过 ID 获取教室
    pub async fn get_classroom_by_id_impl(&self, classroom_id: i64) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(classroom_id)
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 通过加入代码获取教室
    pub async fn get_classroom_by_code_impl(
        &self,
        classroom_code: &str,
    ) -> Result<Option<Classroom>> {
        let result = Classrooms::find()
            .filter(Column::ClassroomCode.eq(classroom_code))
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 按可见集合分页列出教室
    pub async fn list_classrooms_with_pagination_impl(
        &self,
        scope: ClassroomVisibility,
        query: ClassroomListParams,
    ) -> Result<(Vec<Classroom>, PaginationInfo)> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let mut select = Classrooms::find();

        // 可见集合翻译为查询过滤
        match scope {
            ClassroomVisibility::All => {}
            ClassroomVisibility::OwnedBy(teacher_id) => {
                select = select.filter(Column::TeacherId.eq(teacher_id));
            }
            ClassroomVisibility::EnrolledBy(student_id) => {
                select = select
                    .join(JoinType::InnerJoin, Relation::Enrollments.def())
                    .filter(enrollments::Column::StudentId.eq(student_id));
            }
            ClassroomVisibility::Nothing => {
                return Ok((
                    Vec::new(),
                    PaginationInfo {
                        page: page as i64,
                        page_size: size as i64,
                        total: 0,
                        total_pages: 0,
                    },
                ));
            }
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询教室总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询教室页数失败: {e}")))?;

        let classrooms = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok((
            classrooms.into_iter().map(|m| m.into_classroom()).collect(),
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        ))
    }

    /// 更新教室信息，加入代码与归属教师不可变
    pub async fn update_classroom_impl(
        &self,
        classroom_id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        let existing = self.get_classroom_by_id_impl(classroom_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(classroom_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("更新教室失败: {e}")))?;

        self.get_classroom_by_id_impl(classroom_id).await
    }

    /// 删除教室，作业与选课记录级联删除
    pub async fn delete_classroom_impl(&self, classroom_id: i64) -> Result<bool> {
        let result = Classrooms::delete_by_id(classroom_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("删除教室失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 解析调用者与教室的归属关系，每个请求解析一次供谓词使用
    pub async fn resolve_classroom_ties_impl(
        &self,
        user_id: i64,
        classroom_id: i64,
    ) -> Result<ClassroomTies> {
        let classroom = self.get_classroom_by_id_impl(classroom_id).await?;
        let owns_classroom = classroom
            .as_ref()
            .is_some_and(|c| c.teacher_id == user_id);

        let enrolled = enrollments::Entity::find()
            .filter(enrollments::Column::ClassroomId.eq(classroom_id))
            .filter(enrollments::Column::StudentId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询选课关系失败: {e}")))?
            .is_some();

        Ok(ClassroomTies {
            owns_classroom,
            enrolled,
        })
    }
}
