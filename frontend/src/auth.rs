//! 认证状态管理模块
//!
//! 会话的唯一事实来源：token 在 [`crate::web::storage`]，
//! 用户身份在这里的 `AuthState` 信号。
//! 核心转移（登录 / 恢复 / 登出）写成对 `ShopBackend` + `TokenStore`
//! 泛型的纯异步函数，浏览器端只是薄 wrapper。

use leptos::prelude::*;

use scuffers_shared::User;
use scuffers_shared::protocol::RegisterRequest;

use crate::api::{ApiError, ShopBackend};
use crate::guard::AuthSnapshot;
use crate::web::storage::TokenStore;

#[cfg(test)]
mod tests;

// =========================================================
// 状态 (State)
// =========================================================

/// 认证状态
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// 当前用户（未登录为 None）
    pub user: Option<User>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 会话恢复是否仍在进行。守卫在此期间判 Pending
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        // 启动瞬间尚未得知会话结论，必须从 loading 开始，
        // 否则刷新受保护页面会闪一次登录页
        Self {
            user: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

impl AuthState {
    /// 管理员 = staff 或 superuser
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
        }
    }

    fn anonymous() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            is_loading: false,
        }
    }
}

// =========================================================
// 状态转移 (Transitions)
// =========================================================

/// 登录：取 token 对 → 持久化 → 拉取用户档案
///
/// 任一步失败都不留半个会话：me() 失败时清掉刚存的 token。
pub async fn login_with<B, T>(
    backend: &B,
    tokens: &T,
    email: &str,
    password: &str,
) -> Result<User, ApiError>
where
    B: ShopBackend,
    T: TokenStore,
{
    let pair = backend.login(email, password).await?;
    tokens.store(&pair.access, Some(&pair.refresh));

    match backend.me().await {
        Ok(user) => Ok(user),
        Err(err) => {
            tokens.clear();
            Err(err)
        }
    }
}

/// 注册：后端一并返回用户和 token 对，成功即视为已登录
pub async fn register_with<B, T>(
    backend: &B,
    tokens: &T,
    request: RegisterRequest,
) -> Result<User, ApiError>
where
    B: ShopBackend,
    T: TokenStore,
{
    let response = backend.register(request).await?;
    tokens.store(&response.access, Some(&response.refresh));
    Ok(response.user)
}

/// 启动时恢复会话：有 access token 就问一次 me()
///
/// token 失效（me() 报错且 401 重试链也救不回来）按未登录处理，
/// 并清掉残留 token。返回 None 不是错误。
pub async fn restore_with<B, T>(backend: &B, tokens: &T) -> Option<User>
where
    B: ShopBackend,
    T: TokenStore,
{
    tokens.access()?;

    match backend.me().await {
        Ok(user) => Some(user),
        Err(_) => {
            tokens.clear();
            None
        }
    }
}

/// 登出只是本地动作：丢弃 token。可重复调用
pub fn logout_with<T: TokenStore>(tokens: &T) {
    tokens.clear();
}

// =========================================================
// Context
// =========================================================

/// 认证上下文，挂在 App 根部
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state
    }

    /// 给路由守卫用的只读快照信号
    pub fn snapshot(&self) -> Signal<AuthSnapshot> {
        let state = self.state;
        Signal::derive(move || {
            let s = state.get();
            AuthSnapshot {
                is_loading: s.is_loading,
                is_authenticated: s.is_authenticated,
                is_admin: s.is_admin(),
            }
        })
    }

    pub fn set_authenticated(&self, user: User) {
        log_info!("[Auth] Session established for {}.", user.display_name());
        self.set_state.set(AuthState::authenticated(user));
    }

    pub fn set_anonymous(&self) {
        self.set_state.set(AuthState::anonymous());
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
