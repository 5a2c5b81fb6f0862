use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 教师统计
///
/// `pending` = 作业数 - 提交数，不做下限截断，可能为负。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct TeacherStats {
    pub total_students: i64,
    pub total_assignments: i64,
    pub total_submissions: i64,
    pub completed: i64,
    pub pending: i64,
}

/// 学生统计
///
/// 已完成/待完成按作业状态字段计数，与教师统计的口径不同。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "stats.ts")]
pub struct StudentStats {
    pub total_assignments: i64,
    pub total_submissions: i64,
    pub completed_assignments: i64,
    pub pending_assignments: i64,
}
