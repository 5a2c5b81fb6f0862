use crate::models::common::pagination::{default_page, default_size, deserialize_string_to_i64};
use serde::{Deserialize, Deserializer};
use ts_rs::TS;

// 创建作业请求
//
// 教师由当前会话确定，请求体中的 teacher 字段会被忽略。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub student_id: Option<i64>,
    pub status: Option<String>,
}

// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: Option<String>,
    /// 缺省表示不修改，显式 null 表示取消指派
    #[serde(default, deserialize_with = "deserialize_optional_field")]
    #[ts(optional)]
    pub student_id: Option<Option<i64>>,
}

// 作业列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentListParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_string_to_i64")]
    pub size: i64,
    pub status: Option<String>,
    pub student_id: Option<i64>,
    pub search: Option<String>,
}

/// 区分"字段缺省"与"字段为 null"
pub(crate) fn deserialize_optional_field<'de, D, T>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_student_id_tristate() {
        let req: UpdateAssignmentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.student_id, None);

        let req: UpdateAssignmentRequest = serde_json::from_str(r#"{"student_id":null}"#).unwrap();
        assert_eq!(req.student_id, Some(None));

        let req: UpdateAssignmentRequest = serde_json::from_str(r#"{"student_id":7}"#).unwrap();
        assert_eq!(req.student_id, Some(Some(7)));
    }

    #[test]
    fn test_create_ignores_teacher_field() {
        let req: CreateAssignmentRequest = serde_json::from_str(
            r#"{"title":"Essay 1","due_date":"2025-03-01T00:00:00Z","teacher":99}"#,
        )
        .unwrap();
        assert_eq!(req.title, "Essay 1");
        assert_eq!(req.student_id, None);
    }
}
