use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

// 教师时间安排（每周重复）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct TeacherSchedule {
    pub id: i64,
    pub teacher_id: i64,
    pub teacher: Option<UserSummary>,
    /// 0 = 周日 … 6 = 周六
    pub day_of_week: i32,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub is_available: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cancellation_reason: Option<String>,
    pub student_id: Option<i64>,
    pub student: Option<UserSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
