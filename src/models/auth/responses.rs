use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 登录/注册成功响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginResponse {
    pub user: User,
    /// 会话有效期（秒）
    pub expires_in: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct UserInfoResponse {
    pub user: User,
}
