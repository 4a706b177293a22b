//! 路由守卫模块
//!
//! 守卫是 `{is_loading, is_authenticated, is_admin}` 上的纯状态机，
//! 每次渲染 / 导航重新求值，不缓存结论。
//! 路由服务和 RouterOutlet 都只消费这里的判定结果。

use crate::web::route::AppRoute;

/// 守卫输入：认证 store 的只读快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话恢复未完成，渲染占位
    Pending,
    /// 放行
    Authorized,
    /// 未登录访问受保护页 → 跳登录页（带 next）
    Unauthorized,
    /// 已登录但非管理员访问后台 → 跳首页
    Forbidden,
}

impl GuardDecision {
    /// 对目标路由求值
    pub fn evaluate(route: &AppRoute, auth: &AuthSnapshot) -> Self {
        if !route.requires_auth() {
            return GuardDecision::Authorized;
        }
        if auth.is_loading {
            return GuardDecision::Pending;
        }
        if !auth.is_authenticated {
            return GuardDecision::Unauthorized;
        }
        if route.requires_admin() && !auth.is_admin {
            return GuardDecision::Forbidden;
        }
        GuardDecision::Authorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(is_loading: bool, is_authenticated: bool, is_admin: bool) -> AuthSnapshot {
        AuthSnapshot {
            is_loading,
            is_authenticated,
            is_admin,
        }
    }

    #[test]
    fn public_routes_never_blocked() {
        // 公开页在任何认证状态下直接放行，连 loading 都不等
        for snapshot in [auth(true, false, false), auth(false, false, false)] {
            assert_eq!(
                GuardDecision::evaluate(&AppRoute::Home, &snapshot),
                GuardDecision::Authorized
            );
        }
    }

    #[test]
    fn protected_route_waits_for_session_restore() {
        assert_eq!(
            GuardDecision::evaluate(&AppRoute::Cart, &auth(true, false, false)),
            GuardDecision::Pending
        );
    }

    #[test]
    fn pending_to_unauthorized_fires_when_loading_ends_unauthenticated() {
        let route = AppRoute::MyOrders;
        assert_eq!(
            GuardDecision::evaluate(&route, &auth(true, false, false)),
            GuardDecision::Pending
        );
        // loading 结束且未认证 → 恰好此时变为 Unauthorized
        assert_eq!(
            GuardDecision::evaluate(&route, &auth(false, false, false)),
            GuardDecision::Unauthorized
        );
    }

    #[test]
    fn pending_to_forbidden_for_non_admin() {
        let route = AppRoute::AdminProducts;
        assert_eq!(
            GuardDecision::evaluate(&route, &auth(true, true, false)),
            GuardDecision::Pending
        );
        assert_eq!(
            GuardDecision::evaluate(&route, &auth(false, true, false)),
            GuardDecision::Forbidden
        );
    }

    #[test]
    fn admin_passes_admin_routes() {
        assert_eq!(
            GuardDecision::evaluate(&AppRoute::AdminOrders, &auth(false, true, true)),
            GuardDecision::Authorized
        );
    }

    #[test]
    fn unauthenticated_admin_route_is_unauthorized_not_forbidden() {
        // 未登录优先跳登录页，而不是直接打回首页
        assert_eq!(
            GuardDecision::evaluate(&AppRoute::AdminHome, &auth(false, false, false)),
            GuardDecision::Unauthorized
        );
    }
}
