//! 作业存储操作

use super::SeaOrmStorage;
use crate::access::AccessPolicy;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::errors::{Result, TutorDeskError};
use crate::models::{
    assignments::{
        entities::{Assignment, DEFAULT_ASSIGNMENT_STATUS},
        requests::{AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    users::entities::{Caller, UserRole},
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// 教师看到自己创建的作业，学生看到指派给自己的作业
pub(crate) fn scope(caller: &Caller) -> Condition {
    match caller.role {
        UserRole::Teacher => Condition::all().add(Column::TeacherId.eq(caller.id)),
        UserRole::Student => Condition::all().add(Column::StudentId.eq(caller.id)),
    }
}

impl SeaOrmStorage {
    /// 分页列出作业，筛选条件与角色范围取交集
    pub async fn list_assignments_impl(
        &self,
        caller: &Caller,
        query: AssignmentListParams,
    ) -> Result<AssignmentListResponse> {
        let mut select = Assignments::find().filter(scope(caller));

        // 状态筛选
        if let Some(ref status) = query.status
            && !status.trim().is_empty()
        {
            select = select.filter(Column::Status.eq(status.trim()));
        }

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 搜索条件（按标题搜索）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Title.like(like_contains(search.trim())));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (rows, pagination) = self
            .paginate_select(select, query.page, query.size, "作业")
            .await?;

        let items = self.build_assignments(rows).await?;
        Ok(AssignmentListResponse { items, pagination })
    }

    pub async fn get_assignment_impl(&self, caller: &Caller, id: i64) -> Result<Option<Assignment>> {
        let Some(model) = self.find_scoped_assignment(caller, id).await? else {
            return Ok(None);
        };
        Ok(self.build_assignments(vec![model]).await?.pop())
    }

    /// 创建作业，教师固定为调用者
    pub async fn create_assignment_impl(
        &self,
        caller: &Caller,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        if let Some(student_id) = req.student_id {
            self.ensure_student_linked(caller, student_id).await?;
        }

        let now = chrono::Utc::now().timestamp();
        let status = req
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ASSIGNMENT_STATUS.to_string());

        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            due_date: Set(req.due_date.timestamp()),
            teacher_id: Set(caller.id),
            student_id: Set(req.student_id),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("创建作业失败: {e}")))?;

        self.build_assignments(vec![result])
            .await?
            .pop()
            .ok_or_else(|| TutorDeskError::database_operation("创建作业失败"))
    }

    /// 更新作业，仅限创建者
    pub async fn update_assignment_impl(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let Some(existing) = self.find_scoped_assignment(caller, id).await? else {
            return Ok(None);
        };

        if let Some(Some(student_id)) = update.student_id {
            self.ensure_student_linked(caller, student_id).await?;
        }

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(description);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date.timestamp());
        }

        if let Some(status) = update.status {
            model.status = Set(status);
        }

        if let Some(student_id) = update.student_id {
            model.student_id = Set(student_id);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(self.build_assignments(vec![result]).await?.pop())
    }

    /// 删除作业（级联删除提交），仅限创建者
    pub async fn delete_assignment_impl(&self, caller: &Caller, id: i64) -> Result<bool> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let result = Assignments::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::TeacherId.eq(caller.id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub(crate) async fn find_scoped_assignment(
        &self,
        caller: &Caller,
        id: i64,
    ) -> Result<Option<Model>> {
        Assignments::find_by_id(id)
            .filter(scope(caller))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询作业失败: {e}")))
    }

    /// 转换为业务模型并填充教师/学生信息
    async fn build_assignments(&self, rows: Vec<Model>) -> Result<Vec<Assignment>> {
        let users = self
            .load_user_summaries(
                rows.iter()
                    .flat_map(|m| std::iter::once(m.teacher_id).chain(m.student_id)),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut assignment = m.into_assignment();
                assignment.teacher = users.get(&assignment.teacher_id).cloned();
                assignment.student = assignment
                    .student_id
                    .and_then(|id| users.get(&id).cloned());
                assignment
            })
            .collect())
    }
}
