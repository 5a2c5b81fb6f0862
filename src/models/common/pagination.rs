use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 自定义反序列化函数，支持字符串到i64的转换
pub(crate) fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_size() -> i64 {
    10
}

/// 每页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

/// 页码上限，保证 `page * MAX_PAGE_SIZE` 不溢出
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// 规范化分页参数：页码限制在 1..=MAX_PAGE，每页条数限制在 1..=100
pub fn normalize_pagination(page: i64, size: i64) -> (u64, u64) {
    let page = page.clamp(1, MAX_PAGE);
    let size = size.clamp(1, MAX_PAGE_SIZE);
    (page as u64, size as u64)
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pagination() {
        assert_eq!(normalize_pagination(1, 10), (1, 10));
        assert_eq!(normalize_pagination(0, 10), (1, 10));
        assert_eq!(normalize_pagination(-3, 0), (1, 1));
        assert_eq!(normalize_pagination(2, 1000), (2, 100));
    }

    #[test]
    fn test_page_upper_bound() {
        let (page, size) = normalize_pagination(i64::MAX, 100);
        assert_eq!(page, MAX_PAGE as u64);
        assert!(page.checked_mul(size).is_some());
    }

    #[test]
    fn test_query_accepts_string_numbers() {
        use crate::models::teacher_students::requests::TeacherStudentListParams;

        let query: TeacherStudentListParams = serde_json::from_str(r#"{"page":"3","size":"20"}"#).unwrap();
        assert_eq!(query.page, 3);
        assert_eq!(query.size, 20);

        let query: TeacherStudentListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
    }
}
