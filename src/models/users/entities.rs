use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: teacher, student"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub avatar: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn caller(&self) -> Caller {
        Caller::from(self)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// 嵌入在其他资源中的用户摘要
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
}

/// 当前请求的调用者身份
///
/// 由会话中间件从已登录用户构造，显式传入每一个按角色过滤的存储调用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub role: UserRole,
}

impl Caller {
    pub fn new(id: i64, role: UserRole) -> Self {
        Self { id, role }
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("teacher".parse::<UserRole>(), Ok(UserRole::Teacher));
        assert_eq!("student".parse::<UserRole>(), Ok(UserRole::Student));
        assert!("admin".parse::<UserRole>().is_err());
        assert!("Teacher".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let role: UserRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, UserRole::Student);
        assert_eq!(serde_json::to_string(&UserRole::Teacher).unwrap(), "\"teacher\"");
        assert!(serde_json::from_str::<UserRole>("\"parent\"").is_err());
    }
}
