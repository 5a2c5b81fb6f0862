use crate::models::assignments::requests::deserialize_optional_field;
use crate::models::common::pagination::{default_page, default_size, deserialize_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 创建时间安排请求（教师由当前会话确定）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct CreateScheduleRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub is_available: Option<bool>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub student_id: Option<i64>,
}

// 更新时间安排请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct UpdateScheduleRequest {
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_available: Option<bool>,
    /// 以下可空字段：缺省表示不修改，显式 null 表示清空
    #[serde(default, deserialize_with = "deserialize_optional_field")]
    #[ts(optional)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_field")]
    #[ts(optional)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_field")]
    #[ts(optional)]
    pub cancellation_reason: Option<Option<String>>,
    /// 显式 null 表示清除预约
    #[serde(default, deserialize_with = "deserialize_optional_field")]
    #[ts(optional)]
    pub student_id: Option<Option<i64>>,
}

// 时间安排列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "schedule.ts")]
pub struct ScheduleListParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_string_to_i64")]
    pub size: i64,
    pub day_of_week: Option<i32>,
    pub is_available: Option<bool>,
    pub teacher_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_text_fields_tristate() {
        let req: UpdateScheduleRequest = serde_json::from_str(r#"{"day_of_week":2}"#).unwrap();
        assert_eq!(req.title, None);
        assert_eq!(req.cancellation_reason, None);

        let req: UpdateScheduleRequest =
            serde_json::from_str(r#"{"title":null,"description":"Room 3"}"#).unwrap();
        assert_eq!(req.title, Some(None));
        assert_eq!(req.description, Some(Some("Room 3".to_string())));
        assert_eq!(req.cancellation_reason, None);
    }
}
