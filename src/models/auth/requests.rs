use serde::Deserialize;
use ts_rs::TS;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct LoginRequest {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
}

// 用户注册请求
//
// role 以字符串接收，由服务层校验，以便返回字段级错误。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub avatar: Option<String>,
}

// 更新个人资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "auth.ts")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub avatar: Option<String>,
    /// 新密码，修改时必须同时提供当前密码
    pub password: Option<String>,
    pub current_password: Option<String>,
}
