//! 师生关系存储操作

use super::{SeaOrmStorage, db_error};
use crate::access::AccessPolicy;
use crate::entity::teacher_students::{ActiveModel, Column, Entity as TeacherStudents};
use crate::errors::{Result, TutorDeskError};
use crate::models::{
    teacher_students::{
        entities::TeacherStudent, requests::TeacherStudentListParams,
        responses::TeacherStudentListResponse,
    },
    users::entities::{Caller, UserRole},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// 教师看到自己名下的关系，学生看到自己所属的关系
fn scope(caller: &Caller) -> Condition {
    match caller.role {
        UserRole::Teacher => Condition::all().add(Column::TeacherId.eq(caller.id)),
        UserRole::Student => Condition::all().add(Column::StudentId.eq(caller.id)),
    }
}

impl SeaOrmStorage {
    pub async fn list_teacher_students_impl(
        &self,
        caller: &Caller,
        query: TeacherStudentListParams,
    ) -> Result<TeacherStudentListResponse> {
        let select = TeacherStudents::find()
            .filter(scope(caller))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (rows, pagination) = self
            .paginate_select(select, query.page, query.size, "师生关系")
            .await?;

        let mut items: Vec<TeacherStudent> =
            rows.into_iter().map(|m| m.into_teacher_student()).collect();
        self.attach_link_users(&mut items).await?;

        Ok(TeacherStudentListResponse { items, pagination })
    }

    pub async fn get_teacher_student_impl(
        &self,
        caller: &Caller,
        id: i64,
    ) -> Result<Option<TeacherStudent>> {
        let result = TeacherStudents::find_by_id(id)
            .filter(scope(caller))
            .one(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询师生关系失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut items = vec![model.into_teacher_student()];
        self.attach_link_users(&mut items).await?;
        Ok(items.pop())
    }

    /// 教师添加学生，教师固定为调用者
    pub async fn create_teacher_student_impl(
        &self,
        caller: &Caller,
        student_id: i64,
    ) -> Result<TeacherStudent> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let student = self
            .get_user_by_id_impl(student_id)
            .await?
            .ok_or_else(|| TutorDeskError::not_found(format!("User {student_id} not found")))?;

        if student.role != UserRole::Student {
            return Err(TutorDeskError::validation("student_id: user is not a student"));
        }

        let model = ActiveModel {
            teacher_id: Set(caller.id),
            student_id: Set(student_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("添加学生失败"))?;

        let mut items = vec![result.into_teacher_student()];
        self.attach_link_users(&mut items).await?;
        items
            .pop()
            .ok_or_else(|| TutorDeskError::database_operation("添加学生失败"))
    }

    /// 删除师生关系，只能删除自己名下的记录
    pub async fn delete_teacher_student_impl(&self, caller: &Caller, id: i64) -> Result<bool> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let result = TeacherStudents::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::TeacherId.eq(caller.id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("删除师生关系失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn is_student_linked_impl(&self, teacher_id: i64, student_id: i64) -> Result<bool> {
        let count = TeacherStudents::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("查询师生关系失败: {e}")))?;

        Ok(count > 0)
    }

    /// 作业与时间安排中指定学生时，学生必须属于调用者
    pub(crate) async fn ensure_student_linked(&self, caller: &Caller, student_id: i64) -> Result<()> {
        if self.is_student_linked_impl(caller.id, student_id).await? {
            Ok(())
        } else {
            Err(TutorDeskError::validation(
                "student_id: student not found in your class",
            ))
        }
    }

    async fn attach_link_users(&self, items: &mut [TeacherStudent]) -> Result<()> {
        let users = self
            .load_user_summaries(items.iter().flat_map(|i| [i.teacher_id, i.student_id]))
            .await?;

        for item in items.iter_mut() {
            item.teacher = users.get(&item.teacher_id).cloned();
            item.student = users.get(&item.student_id).cloned();
        }
        Ok(())
    }
}
