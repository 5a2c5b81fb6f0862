//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub submitted_at: i64,
    pub is_reviewed: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub review_content: Option<String>,
    pub reviewed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        crate::models::submissions::entities::Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            student_id: self.student_id,
            student: None,
            assignment_title: None,
            content: self.content,
            submitted_at: super::from_timestamp(self.submitted_at),
            is_reviewed: self.is_reviewed,
            review_content: self.review_content,
            reviewed_at: self.reviewed_at.map(super::from_timestamp),
        }
    }
}
