//! 会话工具
//!
//! 会话键为随机字符串，保存在对象缓存中：`session:{key}` -> 用户 ID。
//! 客户端通过 HttpOnly Cookie 携带会话键。

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;

const SESSION_KEY_LEN: usize = 32;
const SESSION_CACHE_PREFIX: &str = "session:";

pub struct SessionUtils;

impl SessionUtils {
    /// 生成随机会话键
    pub fn generate_session_key() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_KEY_LEN)
            .map(char::from)
            .collect()
    }

    fn cache_key(session_key: &str) -> String {
        format!("{SESSION_CACHE_PREFIX}{session_key}")
    }

    /// 创建会话并返回会话键
    pub async fn create_session(cache: &dyn ObjectCache, user_id: i64) -> String {
        let session_key = Self::generate_session_key();
        cache
            .insert_raw(
                Self::cache_key(&session_key),
                user_id.to_string(),
                AppConfig::get().session.ttl,
            )
            .await;
        session_key
    }

    /// 解析会话键对应的用户 ID
    pub async fn resolve_session(cache: &dyn ObjectCache, session_key: &str) -> Option<i64> {
        match cache.get_raw(&Self::cache_key(session_key)).await {
            CacheResult::Found(value) => value.parse::<i64>().ok(),
            _ => None,
        }
    }

    /// 销毁会话
    pub async fn destroy_session(cache: &dyn ObjectCache, session_key: &str) {
        cache.remove(&Self::cache_key(session_key)).await;
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(session_key: &str) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), session_key.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                config.session.ttl as i64,
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.session.secure)
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.session.secure)
            .finish()
    }

    /// 从请求中提取会话键
    pub fn extract_session_key(req: &HttpRequest) -> Option<String> {
        req.cookie(&AppConfig::get().session.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    #[test]
    fn test_session_key_shape() {
        let a = SessionUtils::generate_session_key();
        let b = SessionUtils::generate_session_key();
        assert_eq!(a.len(), SESSION_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let cache = MokaCacheWrapper::with_capacity(100, 60);
        let key = SessionUtils::create_session(&cache, 7).await;
        assert_eq!(SessionUtils::resolve_session(&cache, &key).await, Some(7));

        SessionUtils::destroy_session(&cache, &key).await;
        assert_eq!(SessionUtils::resolve_session(&cache, &key).await, None);
        assert_eq!(SessionUtils::resolve_session(&cache, "unknown").await, None);
    }
}
