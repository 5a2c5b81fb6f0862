use crate::models::common::pagination::{default_page, default_size, deserialize_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 添加学生请求（教师由当前会话确定）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "teacher_student.ts")]
pub struct CreateTeacherStudentRequest {
    pub student_id: i64,
}

// 师生关系列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "teacher_student.ts")]
pub struct TeacherStudentListParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_string_to_i64")]
    pub size: i64,
}
