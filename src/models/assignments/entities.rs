use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

/// 作业默认状态
pub const DEFAULT_ASSIGNMENT_STATUS: &str = "pending";
/// 学生统计中视为已完成的状态
pub const COMPLETED_ASSIGNMENT_STATUS: &str = "completed";

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub teacher_id: i64,
    pub student_id: Option<i64>,
    pub teacher: Option<UserSummary>,
    pub student: Option<UserSummary>,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
