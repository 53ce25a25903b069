//! 作业存储操作

use super::SeaOrmStorage;
use crate::access::scoping::AssignmentVisibility;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{ClasstrackError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
};
use crate::utils::{escape_like_pattern, parse_ordering};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

fn apply_scope(
    select: sea_orm::Select<Assignments>,
    scope: AssignmentVisibility,
) -> Option<sea_orm::Select<Assignments>> {
    match scope {
        AssignmentVisibility::AnyStatus => Some(select),
        AssignmentVisibility::PublishedOnly => {
            Some(select.filter(Column::Status.eq(AssignmentStatus::PUBLISHED)))
        }
        AssignmentVisibility::Nothing => None,
    }
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        classroom_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            name: Set(req.name),
            description: Set(req.description),
            due_date: Set(req.due_date.map(|d| d.to_string())),
            score: Set(req.score),
            status: Set(req.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 获取教室内的作业，可见集合直接过滤查询
    pub async fn get_assignment_in_classroom_impl(
        &self,
        classroom_id: i64,
        assignment_id: i64,
        scope: AssignmentVisibility,
    ) -> Result<Option<Assignment>> {
        let select = Assignments::find_by_id(assignment_id)
            .filter(Column::ClassroomId.eq(classroom_id));

        let Some(select) = apply_scope(select, scope) else {
            return Ok(None);
        };

        let result = select
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 按可见集合分页列出教室内的作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        classroom_id: i64,
        scope: AssignmentVisibility,
        query: AssignmentListParams,
    ) -> Result<(Vec<Assignment>, PaginationInfo)> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let select = Assignments::find().filter(Column::ClassroomId.eq(classroom_id));

        let Some(mut select) = apply_scope(select, scope) else {
            return Ok((
                Vec::new(),
                PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: 0,
                    total_pages: 0,
                },
            ));
        };

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 未知排序字段落回默认的创建时间倒序
        let ordering_column = match parse_ordering(query.ordering.as_deref()) {
            Some(("due_date", desc)) => Some((Column::DueDate, desc)),
            Some(("score", desc)) => Some((Column::Score, desc)),
            Some(("status", desc)) => Some((Column::Status, desc)),
            Some(("created_at", desc)) => Some((Column::CreatedAt, desc)),
            _ => None,
        };
        select = match ordering_column {
            Some((column, true)) => select.order_by_desc(column),
            Some((column, false)) => select.order_by_asc(column),
            None => select.order_by_desc(Column::CreatedAt),
        };

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok((
            assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        ))
    }

    /// 更新作业
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let existing = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.to_string()));
        }

        if let Some(score) = update.score {
            model.score = Set(Some(score));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("更新作业失败: {e}")))?;

        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 删除作业，提交记录级联删除
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClasstrackError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classrooms::requests::CreateClassroomRequest;
    use crate::models::common::pagination::PaginationQuery;
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

    fn assignment_request(name: &str, due_date: &str, score: i32) -> CreateAssignmentRequest {
        CreateAssignmentRequest {
            name: name.to_string(),
            description: None,
            due_date: Some(due_date.parse().unwrap()),
            score: Some(score),
            status: AssignmentStatus::Published,
        }
    }

    fn params(ordering: &str) -> AssignmentListParams {
        AssignmentListParams {
            pagination: PaginationQuery::default(),
            search: None,
            ordering: Some(ordering.to_string()),
        }
    }

    #[tokio::test]
    async fn test_assignment_list_ordering() {
        let storage = memory_storage().await;
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
            .create_assignment_impl(classroom.id, assignment_request("HW1", "2099-01-10", 80))
            .await
            .unwrap();
        storage
            .create_assignment_impl(classroom.id, assignment_request("HW2", "2099-01-05", 100))
            .await
            .unwrap();

        let (by_due, _) = storage
            .list_assignments_with_pagination_impl(
                classroom.id,
                AssignmentVisibility::AnyStatus,
                params("due_date"),
            )
            .await
            .unwrap();
        assert_eq!(by_due[0].name, "HW2");
        assert_eq!(by_due[1].name, "HW1");

        let (by_score_desc, _) = storage
            .list_assignments_with_pagination_impl(
                classroom.id,
                AssignmentVisibility::AnyStatus,
                params("-score"),
            )
            .await
            .unwrap();
        assert_eq!(by_score_desc[0].name, "HW2");

        // 未知字段不报错，按默认排序返回全部
        let (fallback, _) = storage
            .list_assignments_with_pagination_impl(
                classroom.id,
                AssignmentVisibility::AnyStatus,
                params("bogus"),
            )
            .await
            .unwrap();
        assert_eq!(fallback.len(), 2);
    }
}
