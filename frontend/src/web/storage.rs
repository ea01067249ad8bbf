//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，失败时静默降级。

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取字符串值；空字符串视为不存在
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?
            .get_item(key)
            .ok()?
            .filter(|value| !value.is_empty())
    }

    /// 写入；返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        let stored = Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some();
        if !stored {
            log::warn!("localStorage write failed for `{key}`");
        }
        stored
    }

    /// 删除；返回是否成功
    pub fn remove(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
