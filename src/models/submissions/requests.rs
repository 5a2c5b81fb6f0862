use crate::models::common::pagination::{default_page, default_size, deserialize_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

// 创建提交请求（学生由当前会话确定）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub content: String,
}

// 修改提交内容请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct UpdateSubmissionRequest {
    pub content: String,
}

// 批阅提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct ReviewSubmissionRequest {
    pub review_content: String,
}

// 提交列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_string_to_i64")]
    pub size: i64,
    pub assignment_id: Option<i64>,
    pub is_reviewed: Option<bool>,
}
