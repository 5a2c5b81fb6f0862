use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 师生关系
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher_student.ts")]
pub struct TeacherStudent {
    pub id: i64,
    pub teacher_id: i64,
    pub student_id: i64,
    pub teacher: Option<UserSummary>,
    pub student: Option<UserSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
