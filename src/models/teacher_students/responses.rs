use serde::Serialize;
use ts_rs::TS;

use super::entities::TeacherStudent;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher_student.ts")]
pub struct TeacherStudentListResponse {
    pub items: Vec<TeacherStudent>,
    pub pagination: PaginationInfo,
}
