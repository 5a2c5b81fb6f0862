//! 教师时间安排存储操作

use super::SeaOrmStorage;
use crate::access::AccessPolicy;
use crate::entity::teacher_schedules::{ActiveModel, Column, Entity as TeacherSchedules, Model};
use crate::entity::teacher_students::{Column as LinkColumn, Entity as TeacherStudents};
use crate::errors::{Result, TutorDeskError};
use crate::models::{
    schedules::{
        entities::TeacherSchedule,
        requests::{CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest},
        responses::ScheduleListResponse,
    },
    users::entities::{Caller, UserRole},
    FieldErrors,
};
use crate::utils::validate::validate_time_range;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait, Set,
};

/// 教师看到自己的安排，学生看到与自己有师生关系的教师的安排
fn scope(caller: &Caller) -> Condition {
    match caller.role {
        UserRole::Teacher => Condition::all().add(Column::TeacherId.eq(caller.id)),
        UserRole::Student => Condition::all().add(
            Column::TeacherId.in_subquery(
                TeacherStudents::find()
                    .select_only()
                    .column(LinkColumn::TeacherId)
                    .filter(LinkColumn::StudentId.eq(caller.id))
                    .into_query(),
            ),
        ),
    }
}

impl SeaOrmStorage {
    pub async fn list_schedules_impl(
        &self,
        caller: &Caller,
        query: ScheduleListParams,
    ) -> Result<ScheduleListResponse> {
        let mut select = TeacherSchedules::find().filter(scope(caller));

        if let Some(day_of_week) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day_of_week));
        }

        if let Some(is_available) = query.is_available {
            select = select.filter(Column::IsAvailable.eq(is_available));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        select = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id);

        let (rows, pagination) = self
            .paginate_select(select, query.page, query.size, "时间安排")
            .await?;

        let items = self.build_schedules(rows).await?;
        Ok(ScheduleListResponse { items, pagination })
    }

    pub async fn get_schedule_impl(
        &self,
        caller: &Caller,
        id: i64,
    ) -> Result<Option<TeacherSchedule>> {
        let Some(model) = self.find_scoped_schedule(caller, id).await? else {
            return Ok(None);
        };
        Ok(self.build_schedules(vec![model]).await?.pop())
    }

    /// 创建时间安排，教师固定为调用者
    pub async fn create_schedule_impl(
        &self,
        caller: &Caller,
        req: CreateScheduleRequest,
    ) -> Result<TeacherSchedule> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        if let Some(student_id) = req.student_id {
            self.ensure_student_linked(caller, student_id).await?;
        }

        let model = ActiveModel {
            teacher_id: Set(caller.id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            is_available: Set(req.is_available.unwrap_or(true)),
            title: Set(req.title),
            description: Set(req.description),
            cancellation_reason: Set(None),
            student_id: Set(req.student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("创建时间安排失败: {e}")))?;

        self.build_schedules(vec![result])
            .await?
            .pop()
            .ok_or_else(|| TutorDeskError::database_operation("创建时间安排失败"))
    }

    /// 更新时间安排，仅限所属教师
    pub async fn update_schedule_impl(
        &self,
        caller: &Caller,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<TeacherSchedule>> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let Some(existing) = self.find_scoped_schedule(caller, id).await? else {
            return Ok(None);
        };

        if let Some(Some(student_id)) = update.student_id {
            self.ensure_student_linked(caller, student_id).await?;
        }

        // 只改一端时按合并后的时间段校验
        let start = update.start_time.as_deref().unwrap_or(&existing.start_time);
        let end = update.end_time.as_deref().unwrap_or(&existing.end_time);
        let mut errors = FieldErrors::new();
        validate_time_range(start, end, &mut errors);
        if let Some((field, messages)) = errors.into_iter().next() {
            return Err(TutorDeskError::validation(format!(
                "{field}: {}",
                messages.join("; ")
            )));
        }

        let mut model: ActiveModel = existing.into();

        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }
        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }
        if let Some(is_available) = update.is_available {
            model.is_available = Set(is_available);
        }
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(description);
        }
        if let Some(reason) = update.cancellation_reason {
            model.cancellation_reason = Set(reason);
        }
        if let Some(student_id) = update.student_id {
            model.student_id = Set(student_id);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("更新时间安排失败: {e}")))?;

        Ok(self.build_schedules(vec![result]).await?.pop())
    }

    /// 删除时间安排，仅限所属教师
    pub async fn delete_schedule_impl(&self, caller: &Caller, id: i64) -> Result<bool> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let result = TeacherSchedules::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::TeacherId.eq(caller.id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("删除时间安排失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn find_scoped_schedule(&self, caller: &Caller, id: i64) -> Result<Option<Model>> {
        TeacherSchedules::find_by_id(id)
            .filter(scope(caller))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询时间安排失败: {e}")))
    }

    async fn build_schedules(&self, rows: Vec<Model>) -> Result<Vec<TeacherSchedule>> {
        let users = self
            .load_user_summaries(
                rows.iter()
                    .flat_map(|m| std::iter::once(m.teacher_id).chain(m.student_id)),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut schedule = m.into_schedule();
                schedule.teacher = users.get(&schedule.teacher_id).cloned();
                schedule.student = schedule.student_id.and_then(|id| users.get(&id).cloned());
                schedule
            })
            .collect())
    }
}
