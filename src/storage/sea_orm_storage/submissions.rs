//! 提交存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::access::AccessPolicy;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{Result, TutorDeskError};
use crate::models::{
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListParams},
        responses::SubmissionListResponse,
    },
    users::entities::{Caller, UserRole},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};

/// 教师看到提交到自己作业下的记录，学生只看到自己的提交
pub(crate) fn scope(caller: &Caller) -> Condition {
    match caller.role {
        UserRole::Teacher => Condition::all().add(
            Column::AssignmentId.in_subquery(
                Assignments::find()
                    .select_only()
                    .column(AssignmentColumn::Id)
                    .filter(AssignmentColumn::TeacherId.eq(caller.id))
                    .into_query(),
            ),
        ),
        UserRole::Student => Condition::all().add(Column::StudentId.eq(caller.id)),
    }
}

impl SeaOrmStorage {
    pub async fn list_submissions_impl(
        &self,
        caller: &Caller,
        query: SubmissionListParams,
    ) -> Result<SubmissionListResponse> {
        let mut select = Submissions::find().filter(scope(caller));

        // 作业筛选
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        // 批阅状态筛选
        if let Some(is_reviewed) = query.is_reviewed {
            select = select.filter(Column::IsReviewed.eq(is_reviewed));
        }

        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        let (rows, pagination) = self
            .paginate_select(select, query.page, query.size, "提交")
            .await?;

        let items = self.build_submissions(rows).await?;
        Ok(SubmissionListResponse { items, pagination })
    }

    pub async fn get_submission_impl(&self, caller: &Caller, id: i64) -> Result<Option<Submission>> {
        let Some(model) = self.find_scoped_submission(caller, id).await? else {
            return Ok(None);
        };
        Ok(self.build_submissions(vec![model]).await?.pop())
    }

    /// 学生提交作业
    ///
    /// 作业必须指派给调用者，否则返回 NotFound 且不写入任何记录。
    pub async fn create_submission_impl(
        &self,
        caller: &Caller,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        AccessPolicy::StudentOnly.authorize(caller)?;

        let assignment = Assignments::find_by_id(req.assignment_id)
            .filter(AssignmentColumn::StudentId.eq(caller.id))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询作业失败: {e}")))?;

        if assignment.is_none() {
            return Err(TutorDeskError::not_found(format!(
                "Assignment {} not found",
                req.assignment_id
            )));
        }

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(caller.id),
            content: Set(req.content),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            is_reviewed: Set(false),
            review_content: Set(None),
            reviewed_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("创建提交失败: {e}")))?;

        self.build_submissions(vec![result])
            .await?
            .pop()
            .ok_or_else(|| TutorDeskError::database_operation("创建提交失败"))
    }

    /// 修改提交内容，仅限提交者本人
    pub async fn update_submission_impl(
        &self,
        caller: &Caller,
        id: i64,
        content: String,
    ) -> Result<Option<Submission>> {
        AccessPolicy::StudentOnly.authorize(caller)?;

        let Some(existing) = self.find_scoped_submission(caller, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.content = Set(content);

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("更新提交失败: {e}")))?;

        Ok(self.build_submissions(vec![result]).await?.pop())
    }

    /// 教师批阅提交
    pub async fn review_submission_impl(
        &self,
        caller: &Caller,
        id: i64,
        review_content: String,
    ) -> Result<Option<Submission>> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let Some(existing) = self.find_scoped_submission(caller, id).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.review_content = Set(Some(review_content));
        model.is_reviewed = Set(true);
        model.reviewed_at = Set(Some(chrono::Utc::now().timestamp()));

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("批阅提交失败: {e}")))?;

        Ok(self.build_submissions(vec![result]).await?.pop())
    }

    /// 删除提交，仅限提交者本人
    pub async fn delete_submission_impl(&self, caller: &Caller, id: i64) -> Result<bool> {
        AccessPolicy::StudentOnly.authorize(caller)?;

        let result = Submissions::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::StudentId.eq(caller.id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_scoped_submission(&self, caller: &Caller, id: i64) -> Result<Option<Model>> {
        Submissions::find_by_id(id)
            .filter(scope(caller))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询提交失败: {e}")))
    }

    /// 转换为业务模型并填充学生信息与作业标题
    async fn build_submissions(&self, rows: Vec<Model>) -> Result<Vec<Submission>> {
        let users = self
            .load_user_summaries(rows.iter().map(|m| m.student_id))
            .await?;

        let mut assignment_ids: Vec<i64> = rows.iter().map(|m| m.assignment_id).collect();
        assignment_ids.sort_unstable();
        assignment_ids.dedup();

        let titles: HashMap<i64, String> = if assignment_ids.is_empty() {
            HashMap::new()
        } else {
            Assignments::find()
                .filter(AssignmentColumn::Id.is_in(assignment_ids))
                .all(&self.db)
                .await
                .map_err(|e| TutorDeskError::database_operation(format!("查询作业失败: {e}")))?
                .into_iter()
                .map(|a| (a.id, a.title))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut submission = m.into_submission();
                submission.student = users.get(&submission.student_id).cloned();
                submission.assignment_title = titles.get(&submission.assignment_id).cloned();
                submission
            })
            .collect())
    }
}
