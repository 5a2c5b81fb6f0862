//! 对象缓存
//!
//! 以插件形式注册后端（moka 内存缓存 / redis），启动时按配置选择。
//! 会话存储建立在此之上。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

pub use register::{
    ObjectCacheConstructor, debug_object_cache_registry, get_object_cache_plugin,
    register_object_cache_plugin,
};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端异常，无法确认键是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用后端默认有效期（秒）
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// 声明缓存插件，生成对应的注册函数
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        pub(crate) fn register_plugin() {
            $crate::cache::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::TutorDeskError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// 注册内置缓存后端
pub fn register_builtin_plugins() {
    object_cache::moka::register_plugin();
    object_cache::redis::register_plugin();
}
