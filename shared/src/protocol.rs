//! API 协议模块
//!
//! 用一个 trait 把「请求结构体 → (方法, 路径, 响应类型, 是否鉴权)」
//! 的对应关系固定下来，HTTP 客户端据此做统一的泛型发送，
//! 端点清单只在这一个文件里维护。

use crate::{
    Address, Cart, CreatedOrder, DetailResponse, MpFeedback, MpPreference, OrderDetail,
    OrderStatus, OrderSummary, Product, RefreshResponse, RegisterResponse, ShippingConfirmation,
    TokenPair, User,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 该方法是否携带 JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// 与固定 `PATH` 常量不同，这里用 `path(&self)`：
/// 多数端点带 slug / id 路径参数。
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 是否需要附带 Bearer token
    const REQUIRES_AUTH: bool = false;
    /// The URL path (relative to the API base).
    fn path(&self) -> String;
}

/// 查询参数的最小百分号编码（RFC 3986 unreserved 之外全部转义）
pub fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// =========================================================
// 认证 (Auth)
// =========================================================

/// 登录。前端把 email 填进 `username`，后端两种都认。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/register/".into()
    }
}

/// 当前用户档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/auth/me/".into()
    }
}

/// access token 刷新
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

impl ApiRequest for RefreshRequest {
    type Response = RefreshResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/refresh/".into()
    }
}

// =========================================================
// 产品 (Products)
// =========================================================

/// 产品列表，可按分类 / 搜索词过滤
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsRequest {
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ApiRequest for ListProductsRequest {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        let mut params = Vec::new();
        if let Some(cat) = self.cat.as_deref().filter(|c| !c.is_empty()) {
            params.push(format!("cat={}", encode_query(cat)));
        }
        if let Some(q) = self.search.as_deref().filter(|q| !q.is_empty()) {
            params.push(format!("search={}", encode_query(q)));
        }
        if params.is_empty() {
            "/products/".into()
        } else {
            format!("/products/?{}", params.join("&"))
        }
    }
}

/// 产品详情（按 slug）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailRequest {
    pub slug: String,
}

impl ApiRequest for ProductDetailRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/products/{}/", encode_query(self.slug.trim()))
    }
}

// =========================================================
// 购物车 (Cart)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyCartRequest;

impl ApiRequest for MyCartRequest {
    type Response = Cart;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/cart/my/".into()
    }
}

/// 加购。`size` 可选（后端同时认 `size` / `talle`）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_slug: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ApiRequest for AddToCartRequest {
    type Response = Cart;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/cart/add/".into()
    }
}

/// 减购 / 删除（同一端点约定，反方向）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_slug: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl ApiRequest for RemoveFromCartRequest {
    type Response = Cart;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/cart/remove/".into()
    }
}

// =========================================================
// 联系 / 订阅 (Contact & Newsletter)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ApiRequest for ContactRequest {
    type Response = DetailResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/contact/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

impl ApiRequest for NewsletterRequest {
    type Response = DetailResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/newsletter/subscribe/".into()
    }
}

// =========================================================
// Checkout (Mercado Pago)
// =========================================================

/// 第一步：从购物车创建订单（空 body）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {}

impl ApiRequest for CreateOrderRequest {
    type Response = CreatedOrder;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/checkout/create-order/".into()
    }
}

/// 第二步：确认配送数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmShippingRequest {
    pub order_id: i64,
    pub direccion: String,
    pub ciudad: String,
    pub provincia: String,
    pub codigo_postal: String,
    pub costo_envio: f64,
    pub observaciones: String,
}

impl ApiRequest for ConfirmShippingRequest {
    type Response = ShippingConfirmation;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/checkout/confirm-shipping/".into()
    }
}

/// 第三步：创建 MP 支付偏好
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMpPreferenceRequest {
    #[serde(skip)]
    pub order_id: i64,
}

impl ApiRequest for CreateMpPreferenceRequest {
    type Response = MpPreference;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/checkout/mercadopago/preference/{}/", self.order_id)
    }
}

/// MP 跳转回来后，把 query 参数原样转发给后端
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MpFeedbackRequest {
    /// 不带 `?` 的原始 query string
    #[serde(skip)]
    pub raw_query: String,
}

impl ApiRequest for MpFeedbackRequest {
    type Response = MpFeedback;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        if self.raw_query.is_empty() {
            "/checkout/mp/feedback/".into()
        } else {
            format!("/checkout/mp/feedback/?{}", self.raw_query)
        }
    }
}

// =========================================================
// 我的订单 (My Orders)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyOrdersRequest;

impl ApiRequest for MyOrdersRequest {
    type Response = Vec<OrderSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/orders/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailRequest {
    pub order_id: i64,
}

impl ApiRequest for OrderDetailRequest {
    type Response = OrderDetail;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/orders/{}/", self.order_id)
    }
}

// =========================================================
// 我的地址 (My Address)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAddressRequest;

impl ApiRequest for GetAddressRequest {
    type Response = Address;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/me/address/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAddressRequest {
    #[serde(flatten)]
    pub address: Address,
}

impl ApiRequest for UpdateAddressRequest {
    type Response = Address;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/me/address/".into()
    }
}

// =========================================================
// 后台管理 (Admin CRUD)
// =========================================================

/// 后台产品表单（创建 / 编辑共用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPayload {
    pub nombre: String,
    /// 留空让后端按 nombre 生成
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub precio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub activo: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListProductsRequest;

impl ApiRequest for AdminListProductsRequest {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/admin/products/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCreateProductRequest {
    #[serde(flatten)]
    pub payload: ProductPayload,
}

impl ApiRequest for AdminCreateProductRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/admin/products/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdateProductRequest {
    #[serde(skip)]
    pub id: i64,
    #[serde(flatten)]
    pub payload: ProductPayload,
}

impl ApiRequest for AdminUpdateProductRequest {
    type Response = Product;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/admin/products/{}/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDeleteProductRequest {
    #[serde(skip)]
    pub id: i64,
}

impl ApiRequest for AdminDeleteProductRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/admin/products/{}/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListOrdersRequest;

impl ApiRequest for AdminListOrdersRequest {
    type Response = Vec<OrderSummary>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        "/admin/orders/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOrderDetailRequest {
    pub order_id: i64,
}

impl ApiRequest for AdminOrderDetailRequest {
    type Response = OrderDetail;
    const METHOD: HttpMethod = HttpMethod::Get;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/admin/orders/{}/", self.order_id)
    }
}

/// 后台改订单状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdateOrderRequest {
    #[serde(skip)]
    pub order_id: i64,
    pub estado: OrderStatus,
}

impl ApiRequest for AdminUpdateOrderRequest {
    type Response = OrderDetail;
    const METHOD: HttpMethod = HttpMethod::Patch;
    const REQUIRES_AUTH: bool = true;
    fn path(&self) -> String {
        format!("/admin/orders/{}/", self.order_id)
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_list_path_builds_query() {
        let req = ListProductsRequest::default();
        assert_eq!(req.path(), "/products/");

        let req = ListProductsRequest {
            cat: Some("hoodies".into()),
            search: Some("negro oversize".into()),
        };
        assert_eq!(req.path(), "/products/?cat=hoodies&search=negro%20oversize");
    }

    #[test]
    fn detail_path_encodes_slug() {
        let req = ProductDetailRequest {
            slug: " hoodie-black ".into(),
        };
        assert_eq!(req.path(), "/products/hoodie-black/");
    }

    #[test]
    fn cart_mutation_omits_missing_size() {
        let req = AddToCartRequest {
            product_slug: "hoodie-black".into(),
            quantity: 1,
            size: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "product_slug": "hoodie-black", "quantity": 1 })
        );
    }

    #[test]
    fn mp_preference_path_carries_order_id() {
        let req = CreateMpPreferenceRequest { order_id: 42 };
        assert_eq!(req.path(), "/checkout/mercadopago/preference/42/");
        // order_id 只进路径，不进 body
        assert_eq!(serde_json::to_value(&req).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn feedback_path_forwards_raw_query() {
        let req = MpFeedbackRequest {
            raw_query: "payment_id=1&status=approved".into(),
        };
        assert_eq!(
            req.path(),
            "/checkout/mp/feedback/?payment_id=1&status=approved"
        );
    }

    #[test]
    fn admin_update_order_serializes_only_estado() {
        let req = AdminUpdateOrderRequest {
            order_id: 7,
            estado: OrderStatus::Shipped,
        };
        assert_eq!(req.path(), "/admin/orders/7/");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({ "estado": "shipped" })
        );
    }
}
