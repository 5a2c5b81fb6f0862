//! 统计查询，每次请求实时计算

use super::SeaOrmStorage;
use crate::access::AccessPolicy;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::entity::teacher_students::{Column as LinkColumn, Entity as TeacherStudents};
use crate::errors::{Result, TutorDeskError};
use crate::models::{
    assignments::entities::{COMPLETED_ASSIGNMENT_STATUS, DEFAULT_ASSIGNMENT_STATUS},
    stats::{StudentStats, TeacherStats},
    users::entities::Caller,
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn teacher_stats_impl(&self, caller: &Caller) -> Result<TeacherStats> {
        AccessPolicy::TeacherOnly.authorize(caller)?;

        let total_students = TeacherStudents::find()
            .filter(LinkColumn::TeacherId.eq(caller.id))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计学生数失败: {e}")))?
            as i64;

        let total_assignments = Assignments::find()
            .filter(AssignmentColumn::TeacherId.eq(caller.id))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计作业数失败: {e}")))?
            as i64;

        let total_submissions = Submissions::find()
            .filter(super::submissions::scope(caller))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计提交数失败: {e}")))?
            as i64;

        Ok(TeacherStats {
            total_students,
            total_assignments,
            total_submissions,
            completed: total_submissions,
            pending: total_assignments - total_submissions,
        })
    }

    pub async fn student_stats_impl(&self, caller: &Caller) -> Result<StudentStats> {
        AccessPolicy::StudentOnly.authorize(caller)?;

        let assigned = || Assignments::find().filter(AssignmentColumn::StudentId.eq(caller.id));

        let total_assignments = assigned()
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计作业数失败: {e}")))?
            as i64;

        let completed_assignments = assigned()
            .filter(AssignmentColumn::Status.eq(COMPLETED_ASSIGNMENT_STATUS))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计作业数失败: {e}")))?
            as i64;

        let pending_assignments = assigned()
            .filter(AssignmentColumn::Status.eq(DEFAULT_ASSIGNMENT_STATUS))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计作业数失败: {e}")))?
            as i64;

        let total_submissions = Submissions::find()
            .filter(SubmissionColumn::StudentId.eq(caller.id))
            .count(&self.db)
            .await
            .map_err(|e| TutorDeskError::database_operation(format!("统计提交数失败: {e}")))?
            as i64;

        Ok(StudentStats {
            total_assignments,
            total_submissions,
            completed_assignments,
            pending_assignments,
        })
    }
}
