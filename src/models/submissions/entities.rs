use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserSummary;

/// 提交记录
///
/// 同一学生可对同一作业多次提交，每次提交独立保存。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub student: Option<UserSummary>,
    pub assignment_title: Option<String>,
    pub content: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub is_reviewed: bool,
    pub review_content: Option<String>,
    pub reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
}
