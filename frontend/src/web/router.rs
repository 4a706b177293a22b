//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，
//! 守卫判定委托给 [`crate::guard::GuardDecision`]。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::guard::{AuthSnapshot, GuardDecision};

/// 获取当前浏览器路径（含 query，路由要用 next / 过滤参数）
fn current_path() -> String {
    let Some(window) = web_sys::window() else {
        return "/".to_string();
    };
    let location = window.location();
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    match location.search() {
        Ok(search) if !search.is_empty() => format!("{path}{search}"),
        _ => path,
    }
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由变化后回到页面顶部
fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证快照信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证快照（注入的信号，实现解耦）
    auth: Signal<AuthSnapshot>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `auth` - 认证快照信号，由外部注入实现解耦
    fn new(auth: Signal<AuthSnapshot>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 获取认证快照信号（RouterOutlet 渲染时重新求值守卫）
    pub fn auth_snapshot(&self) -> Signal<AuthSnapshot> {
        self.auth
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 直接按路由对象导航
    pub fn navigate_to(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let snapshot = self.auth.get_untracked();

        let resolved = match GuardDecision::evaluate(&target_route, &snapshot) {
            // 会话恢复中先加载目标路由，Effect 在恢复完成后补判
            GuardDecision::Pending | GuardDecision::Authorized => target_route,
            GuardDecision::Unauthorized => {
                log_info!("[Router] Access denied. Redirecting to login.");
                AppRoute::auth_failure_redirect(&target_route)
            }
            GuardDecision::Forbidden => {
                log_error!("[Router] Admin area denied for non-admin user.");
                AppRoute::forbidden_redirect()
            }
        };

        // 已登录用户访问登录/注册页 → 回首页
        let resolved = if resolved.should_redirect_when_authenticated()
            && !snapshot.is_loading
            && snapshot.is_authenticated
        {
            log_info!("[Router] Already authenticated. Redirecting home.");
            AppRoute::Home
        } else {
            resolved
        };

        let path = resolved.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.set_route.set(resolved);
        scroll_to_top();
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth = self.auth;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let snapshot = auth.get_untracked();

            // popstate 时也执行守卫逻辑
            match GuardDecision::evaluate(&target_route, &snapshot) {
                GuardDecision::Unauthorized => {
                    let redirect = AppRoute::auth_failure_redirect(&target_route);
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                GuardDecision::Forbidden => {
                    let redirect = AppRoute::forbidden_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                _ => set_route.set(target_route),
            }
            scroll_to_top();
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 覆盖两种时序：
    /// - 会话恢复完成后，Pending 的路由需要补判
    /// - 登出时，受保护页面需要退回登录页
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth = self.auth;

        Effect::new(move |_| {
            let snapshot = auth.get();
            if snapshot.is_loading {
                return;
            }
            let route = current_route.get_untracked();

            match GuardDecision::evaluate(&route, &snapshot) {
                GuardDecision::Unauthorized => {
                    log_info!("[Router] Auth state changed: redirecting to login.");
                    let redirect = AppRoute::auth_failure_redirect(&route);
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                GuardDecision::Forbidden => {
                    log_info!("[Router] Auth state changed: admin area forbidden.");
                    let redirect = AppRoute::forbidden_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                _ => {
                    // 用户刚登录：离开登录/注册页，尊重 next
                    if route.should_redirect_when_authenticated() && snapshot.is_authenticated {
                        let next = match &route {
                            AppRoute::Login { next } => next.as_deref(),
                            _ => None,
                        };
                        let redirect = AppRoute::auth_success_redirect(next);
                        log_info!("[Router] Logged in, redirecting to {}.", redirect);
                        push_history_state(&redirect.to_path());
                        set_route.set(redirect);
                    }
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(auth: Signal<AuthSnapshot>) -> RouterService {
    let router = RouterService::new(auth);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证快照信号
    auth: Signal<AuthSnapshot>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
/// 守卫在每次渲染重新求值：未放行的路由渲染占位，
/// 重定向由 `setup_auth_redirect` 的 Effect 完成。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        let snapshot = router.auth_snapshot().get();

        match GuardDecision::evaluate(&current, &snapshot) {
            GuardDecision::Authorized => matcher(current),
            // Pending 渲染 spinner；Unauthorized / Forbidden 渲染空占位
            // 直到 Effect 完成重定向，避免闪现受保护内容
            GuardDecision::Pending => view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any(),
            GuardDecision::Unauthorized | GuardDecision::Forbidden => {
                view! { <div class="min-h-screen"></div> }.into_any()
            }
        }
    }
}
