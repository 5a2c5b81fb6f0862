use crate::models::common::pagination::{default_page, default_size, deserialize_string_to_i64};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 用户列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(default = "default_page", deserialize_with = "deserialize_string_to_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "deserialize_string_to_i64")]
    pub size: i64,
    pub role: Option<UserRole>,
    pub search: Option<String>,
}

// 用户创建参数（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
}

// 用户资料更新参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
}
