//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tutordesk_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TutorDeskError {
            $($variant(String),)*
        }

        impl TutorDeskError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TutorDeskError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TutorDeskError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TutorDeskError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TutorDeskError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TutorDeskError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tutordesk_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl TutorDeskError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            TutorDeskError::Validation(_) | TutorDeskError::DateParse(_) => {
                StatusCode::BAD_REQUEST
            }
            TutorDeskError::Authentication(_) => StatusCode::UNAUTHORIZED,
            TutorDeskError::Authorization(_) => StatusCode::FORBIDDEN,
            TutorDeskError::NotFound(_) => StatusCode::NOT_FOUND,
            TutorDeskError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for TutorDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TutorDeskError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TutorDeskError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                TutorDeskError::Conflict(detail)
            }
            _ => TutorDeskError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for TutorDeskError {
    fn from(err: std::io::Error) -> Self {
        TutorDeskError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TutorDeskError {
    fn from(err: serde_json::Error) -> Self {
        TutorDeskError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TutorDeskError {
    fn from(err: chrono::ParseError) -> Self {
        TutorDeskError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TutorDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TutorDeskError::cache_connection("test").code(), "E001");
        assert_eq!(TutorDeskError::database_config("test").code(), "E003");
        assert_eq!(TutorDeskError::validation("test").code(), "E007");
        assert_eq!(TutorDeskError::conflict("test").code(), "E010");
        assert_eq!(TutorDeskError::authorization("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TutorDeskError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            TutorDeskError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TutorDeskError::authentication("no session").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            TutorDeskError::authorization("role").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            TutorDeskError::not_found("assignment").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TutorDeskError::conflict("pair").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TutorDeskError::database_operation("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = TutorDeskError::validation("Invalid role");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid role"));
    }
}
