//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，
//! 并在其上定义 Token 的唯一存储规范：
//! 历史版本把 access token 写进过 `access` / `accessToken` 两个 key，
//! 这里统一收敛到 `scuffers_access` / `scuffers_refresh`，
//! 启动时做一次性迁移并删除旧 key。

/// 规范 access token key
pub const ACCESS_KEY: &str = "scuffers_access";
/// 规范 refresh token key
pub const REFRESH_KEY: &str = "scuffers_refresh";

/// 旧版 access key（按历史出现顺序）
const LEGACY_ACCESS_KEYS: [&str; 3] = ["access", "accessToken", "access_token"];
/// 旧版 refresh key
const LEGACY_REFRESH_KEYS: [&str; 2] = ["refresh", "refreshToken"];

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// Token 存储抽象 (Token Store)
// =========================================================

/// Token 读写的抽象接口
///
/// 浏览器实现走 LocalStorage；测试用内存实现。
pub trait TokenStore {
    fn access(&self) -> Option<String>;
    fn refresh(&self) -> Option<String>;
    /// 持久化一对 token。`refresh` 为 None 时保留现有值
    /// （SimpleJWT 不开 rotation 时刷新只返回 access）。
    fn store(&self, access: &str, refresh: Option<&str>);
    /// 清除两个 key。可重复调用。
    fn clear(&self);
}

/// 浏览器 LocalStorage 实现
#[derive(Clone, Copy, Default)]
pub struct BrowserTokens;

impl TokenStore for BrowserTokens {
    fn access(&self) -> Option<String> {
        LocalStorage::get(ACCESS_KEY)
    }

    fn refresh(&self) -> Option<String> {
        LocalStorage::get(REFRESH_KEY)
    }

    fn store(&self, access: &str, refresh: Option<&str>) {
        LocalStorage::set(ACCESS_KEY, access);
        if let Some(refresh) = refresh {
            LocalStorage::set(REFRESH_KEY, refresh);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(ACCESS_KEY);
        LocalStorage::delete(REFRESH_KEY);
    }
}

/// 旧 key 一次性迁移，应用启动时调用一次
///
/// 规范 key 缺失且旧 key 存在时采纳旧值；无论是否采纳，
/// 旧 key 一律删除，之后全站只认规范 key。
pub fn migrate_legacy_keys() {
    if LocalStorage::get(ACCESS_KEY).is_none() {
        for key in LEGACY_ACCESS_KEYS {
            if let Some(value) = LocalStorage::get(key) {
                LocalStorage::set(ACCESS_KEY, &value);
                break;
            }
        }
    }
    if LocalStorage::get(REFRESH_KEY).is_none() {
        for key in LEGACY_REFRESH_KEYS {
            if let Some(value) = LocalStorage::get(key) {
                LocalStorage::set(REFRESH_KEY, &value);
                break;
            }
        }
    }
    for key in LEGACY_ACCESS_KEYS.iter().chain(LEGACY_REFRESH_KEYS.iter()) {
        LocalStorage::delete(key);
    }
}

/// 内存实现，仅测试用
#[cfg(test)]
pub struct MemoryTokens {
    access: std::cell::RefCell<Option<String>>,
    refresh: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemoryTokens {
    pub fn new() -> Self {
        Self {
            access: std::cell::RefCell::new(None),
            refresh: std::cell::RefCell::new(None),
        }
    }

    pub fn with_tokens(access: &str, refresh: &str) -> Self {
        let store = Self::new();
        store.store(access, Some(refresh));
        store
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokens {
    fn access(&self) -> Option<String> {
        self.access.borrow().clone()
    }

    fn refresh(&self) -> Option<String> {
        self.refresh.borrow().clone()
    }

    fn store(&self, access: &str, refresh: Option<&str>) {
        *self.access.borrow_mut() = Some(access.to_string());
        if let Some(refresh) = refresh {
            *self.refresh.borrow_mut() = Some(refresh.to_string());
        }
    }

    fn clear(&self) {
        *self.access.borrow_mut() = None;
        *self.refresh.borrow_mut() = None;
    }
}
