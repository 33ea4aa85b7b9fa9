//! 对象缓存层
//!
//! 缓存后端以插件形式注册（见 [`declare_object_cache_plugin`]），
//! 启动时按配置的 `cache.type` 选择，Redis 不可用时回退到内存缓存。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明缓存插件，程序启动时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[::ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::PortalError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// JWT 中间件按 token 缓存用户信息时使用的键
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}
