//! 师生关系实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher_student(self) -> crate::models::teacher_students::entities::TeacherStudent {
        crate::models::teacher_students::entities::TeacherStudent {
            id: self.id,
            teacher_id: self.teacher_id,
            student_id: self.student_id,
            teacher: None,
            student: None,
            created_at: super::from_timestamp(self.created_at),
        }
    }
}
