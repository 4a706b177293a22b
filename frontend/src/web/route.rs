//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、URL 解析 / 生成，以及守卫属性
//! （是否要求登录、是否要求管理员）。

use scuffers_shared::protocol::encode_query;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (默认路由)
    #[default]
    Home,
    /// 商品列表，可带分类 / 搜索过滤
    Shop {
        cat: Option<String>,
        search: Option<String>,
    },
    /// 商品详情（slug 为身份键）
    ProductDetail { slug: String },
    /// 购物车（需要登录）
    Cart,
    /// 登录页。`next` 保存拦截前的目标路径
    Login { next: Option<String> },
    /// 注册页
    Register,
    /// 联系我们
    Contact,
    /// 我的账户（档案 + 配送地址，需要登录）
    MyAccount,
    /// 我的订单列表（需要登录）
    MyOrders,
    /// 订单详情（需要登录）
    OrderDetail { id: i64 },
    /// MP 支付成功回跳，带原始 query 转发给后端
    CheckoutSuccess { raw_query: String },
    /// MP 支付失败回跳
    CheckoutFailure,
    /// MP 支付处理中回跳
    CheckoutPending,
    /// 后台首页（需要管理员）
    AdminHome,
    /// 后台产品管理
    AdminProducts,
    /// 后台订单列表
    AdminOrders,
    /// 后台订单详情
    AdminOrderDetail { id: i64 },
    /// 页面未找到
    NotFound,
}

/// 把 `path?query` 拆开
fn split_query(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (raw, None),
    }
}

/// 从 query string 取一个参数（解码 `%XX` 和 `+`）
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == key { Some(decode_query(v)) } else { None }
    })
}

/// 最小百分号解码
pub fn decode_query(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                let parsed = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match parsed {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

impl AppRoute {
    /// 将 URL path（可带 query）解析为路由枚举
    pub fn from_path(raw: &str) -> Self {
        let (path, query) = split_query(raw);
        let path = path.trim_end_matches('/');

        match path {
            "" => Self::Home,
            "/shop" => Self::Shop {
                cat: query.and_then(|q| query_param(q, "cat")),
                search: query.and_then(|q| query_param(q, "search")),
            },
            "/cart" => Self::Cart,
            "/login" => Self::Login {
                next: query.and_then(|q| query_param(q, "next")),
            },
            "/register" => Self::Register,
            "/contact" => Self::Contact,
            "/account" => Self::MyAccount,
            "/orders" => Self::MyOrders,
            "/checkout/success" => Self::CheckoutSuccess {
                raw_query: query.unwrap_or_default().to_string(),
            },
            "/checkout/failure" => Self::CheckoutFailure,
            "/checkout/pending" => Self::CheckoutPending,
            "/admin" => Self::AdminHome,
            "/admin/products" => Self::AdminProducts,
            "/admin/orders" => Self::AdminOrders,
            _ => {
                if let Some(slug) = path.strip_prefix("/product/") {
                    let slug = slug.trim_matches('/');
                    if !slug.is_empty() {
                        return Self::ProductDetail {
                            slug: decode_query(slug),
                        };
                    }
                }
                if let Some(id) = path.strip_prefix("/orders/") {
                    if let Ok(id) = id.trim_matches('/').parse() {
                        return Self::OrderDetail { id };
                    }
                }
                if let Some(id) = path.strip_prefix("/admin/orders/") {
                    if let Ok(id) = id.trim_matches('/').parse() {
                        return Self::AdminOrderDetail { id };
                    }
                }
                Self::NotFound
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::Shop { cat, search } => {
                let mut params = Vec::new();
                if let Some(cat) = cat.as_deref().filter(|c| !c.is_empty()) {
                    params.push(format!("cat={}", encode_query(cat)));
                }
                if let Some(q) = search.as_deref().filter(|q| !q.is_empty()) {
                    params.push(format!("search={}", encode_query(q)));
                }
                if params.is_empty() {
                    "/shop".into()
                } else {
                    format!("/shop?{}", params.join("&"))
                }
            }
            Self::ProductDetail { slug } => format!("/product/{}", encode_query(slug)),
            Self::Cart => "/cart".into(),
            Self::Login { next } => match next {
                Some(next) => format!("/login?next={}", encode_query(next)),
                None => "/login".into(),
            },
            Self::Register => "/register".into(),
            Self::Contact => "/contact".into(),
            Self::MyAccount => "/account".into(),
            Self::MyOrders => "/orders".into(),
            Self::OrderDetail { id } => format!("/orders/{id}"),
            Self::CheckoutSuccess { raw_query } => {
                if raw_query.is_empty() {
                    "/checkout/success".into()
                } else {
                    format!("/checkout/success?{raw_query}")
                }
            }
            Self::CheckoutFailure => "/checkout/failure".into(),
            Self::CheckoutPending => "/checkout/pending".into(),
            Self::AdminHome => "/admin".into(),
            Self::AdminProducts => "/admin/products".into(),
            Self::AdminOrders => "/admin/orders".into(),
            Self::AdminOrderDetail { id } => format!("/admin/orders/{id}"),
            Self::NotFound => "/404".into(),
        }
    }

    /// **核心守卫属性：该路由是否需要登录**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Cart | Self::MyAccount | Self::MyOrders | Self::OrderDetail { .. }
        ) || self.requires_admin()
    }

    /// 该路由是否需要管理员（staff 或 superuser）
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AdminHome | Self::AdminProducts | Self::AdminOrders | Self::AdminOrderDetail { .. }
        )
    }

    /// 已登录用户是否应该离开此路由（登录 / 注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login { .. } | Self::Register)
    }

    /// 认证失败时的重定向目标，保留原目的地
    pub fn auth_failure_redirect(intended: &AppRoute) -> Self {
        Self::Login {
            next: Some(intended.to_path()),
        }
    }

    /// 权限不足（非管理员访问后台）时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Home
    }

    /// 登录成功后的目标：`next` 优先，否则首页
    pub fn auth_success_redirect(next: Option<&str>) -> Self {
        match next {
            Some(path) if !path.is_empty() => Self::from_path(path),
            _ => Self::Home,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storefront_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(
            AppRoute::from_path("/product/hoodie-black/"),
            AppRoute::ProductDetail {
                slug: "hoodie-black".into()
            }
        );
        assert_eq!(AppRoute::from_path("/orders/15"), AppRoute::OrderDetail { id: 15 });
        assert_eq!(AppRoute::from_path("/orders/abc"), AppRoute::NotFound);
        assert_eq!(
            AppRoute::from_path("/admin/orders/3"),
            AppRoute::AdminOrderDetail { id: 3 }
        );
    }

    #[test]
    fn parses_shop_filters() {
        let route = AppRoute::from_path("/shop?cat=hoodies&search=negro%20oversize");
        assert_eq!(
            route,
            AppRoute::Shop {
                cat: Some("hoodies".into()),
                search: Some("negro oversize".into()),
            }
        );
        assert_eq!(route.to_path(), "/shop?cat=hoodies&search=negro%20oversize");
    }

    #[test]
    fn login_preserves_intended_destination() {
        let redirect = AppRoute::auth_failure_redirect(&AppRoute::Cart);
        assert_eq!(
            redirect,
            AppRoute::Login {
                next: Some("/cart".into())
            }
        );
        assert_eq!(redirect.to_path(), "/login?next=%2Fcart");
        // 往返解析还原 next
        assert_eq!(AppRoute::from_path(&redirect.to_path()), redirect);
    }

    #[test]
    fn guard_attributes() {
        assert!(AppRoute::Cart.requires_auth());
        assert!(!AppRoute::Cart.requires_admin());
        assert!(AppRoute::AdminProducts.requires_auth());
        assert!(AppRoute::AdminProducts.requires_admin());
        assert!(!AppRoute::Home.requires_auth());
        assert!(AppRoute::Login { next: None }.should_redirect_when_authenticated());
    }

    #[test]
    fn checkout_success_keeps_raw_query() {
        let route = AppRoute::from_path("/checkout/success?payment_id=1&status=approved");
        assert_eq!(
            route,
            AppRoute::CheckoutSuccess {
                raw_query: "payment_id=1&status=approved".into()
            }
        );
    }

    #[test]
    fn decode_handles_percent_and_plus() {
        assert_eq!(decode_query("negro+oversize"), "negro oversize");
        assert_eq!(decode_query("a%2Fb"), "a/b");
        assert_eq!(decode_query("truncado%2"), "truncado%2");
    }
}
