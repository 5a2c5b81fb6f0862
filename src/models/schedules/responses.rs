use serde::Serialize;
use ts_rs::TS;

use super::entities::TeacherSchedule;
use crate::models::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListResponse {
    pub items: Vec<TeacherSchedule>,
    pub pagination: PaginationInfo,
}
