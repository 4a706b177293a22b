use serde::{Deserialize, Serialize};

pub mod date;
pub mod num;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// Authorization 头的 scheme
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 用户 / 认证 (Auth Domain)
// =========================================================

/// `/auth/me/` 返回的用户档案
///
/// `is_staff` / `is_superuser` 在部分序列化器版本中缺失，
/// 缺省一律按 `false` 处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl User {
    /// 管理员判定：staff 或 superuser 任一为真
    pub fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// 展示名：优先 first_name，退回 username
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }
}

/// 登录返回的 token 对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// `/auth/register/` 的响应：用户档案 + token 对（扁平）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub access: String,
    pub refresh: String,
}

/// `/auth/refresh/` 的响应
///
/// SimpleJWT 开启 rotation 时会额外返回新的 refresh token。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

// =========================================================
// 产品 (Product Domain)
// =========================================================

fn default_true() -> bool {
    true
}

fn default_one() -> u32 {
    1
}

/// 产品。`slug` 是贯穿列表 / 详情 / 购物车的唯一标识。
///
/// 图片字段历经多个序列化器版本：文件路径 (`imagen`...)、
/// 绝对 URL (`image_url`...)、合并画廊 (`images`)。
/// 形态探测只发生在 [`Product::gallery`] 一处。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "name")]
    pub nombre: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, with = "num", alias = "price")]
    pub precio: f64,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,

    /// 画廊（序列化器新版直接给全量 URL 列表）
    #[serde(default)]
    pub images: Vec<String>,

    // 旧版字段：文件路径
    #[serde(default, alias = "image", alias = "foto")]
    pub imagen: Option<String>,
    #[serde(default)]
    pub imagen_hover: Option<String>,
    #[serde(default)]
    pub imagen_3: Option<String>,
    #[serde(default)]
    pub imagen_4: Option<String>,

    // 旧版字段：单独的派生 URL
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_hover_url: Option<String>,
    #[serde(default)]
    pub image_3_url: Option<String>,
    #[serde(default)]
    pub image_4_url: Option<String>,
}

/// 把后端给的图片路径补全为绝对 URL
///
/// 已是 `http(s)://` 的原样返回；相对路径拼接媒体基地址。
pub fn resolve_image_url(media_base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    Some(format!("{}{}", media_base.trim_end_matches('/'), path))
}

impl Product {
    /// 画廊的唯一归一化入口
    ///
    /// 优先级：`images` > 单独 URL 字段 > 文件路径字段。
    /// 顺序固定为 [主图, hover, 3, 4]，只保留存在的。
    pub fn gallery(&self, media_base: &str) -> Vec<String> {
        if !self.images.is_empty() {
            return self
                .images
                .iter()
                .filter_map(|p| resolve_image_url(media_base, p))
                .collect();
        }

        let urls = [
            &self.image_url,
            &self.image_hover_url,
            &self.image_3_url,
            &self.image_4_url,
        ];
        if urls.iter().any(|u| u.is_some()) {
            return urls
                .iter()
                .filter_map(|u| u.as_deref())
                .filter_map(|p| resolve_image_url(media_base, p))
                .collect();
        }

        [
            &self.imagen,
            &self.imagen_hover,
            &self.imagen_3,
            &self.imagen_4,
        ]
        .iter()
        .filter_map(|u| u.as_deref())
        .filter_map(|p| resolve_image_url(media_base, p))
        .collect()
    }

    /// 主图（画廊第一张）
    pub fn primary_image(&self, media_base: &str) -> Option<String> {
        self.gallery(media_base).into_iter().next()
    }

    /// hover 图（画廊第二张）
    pub fn hover_image(&self, media_base: &str) -> Option<String> {
        self.gallery(media_base).into_iter().nth(1)
    }
}

// =========================================================
// 购物车 (Cart Domain)
// =========================================================

/// 购物车条目。身份 = `(slug, talle)`。
///
/// 产品引用在历史序列化器里出现过三个键名，
/// 用 serde alias 在边界处一次性收敛。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "product", alias = "product_data")]
    pub producto: Option<Product>,
    #[serde(default = "default_one", alias = "quantity")]
    pub cantidad: u32,
    #[serde(default, alias = "size")]
    pub talle: Option<String>,
    #[serde(default, with = "num::opt")]
    pub subtotal: Option<f64>,
    /// 部分旧响应直接在条目上放 slug
    #[serde(default, alias = "product_slug")]
    pub slug: Option<String>,
}

impl CartItem {
    /// 条目的产品 slug（产品对象优先，退回扁平字段）
    pub fn product_slug(&self) -> Option<&str> {
        self.producto
            .as_ref()
            .map(|p| p.slug.as_str())
            .filter(|s| !s.is_empty())
            .or(self.slug.as_deref())
    }

    /// 按 `(slug, talle)` 匹配
    pub fn matches(&self, slug: &str, talle: Option<&str>) -> bool {
        self.product_slug() == Some(slug) && self.talle.as_deref() == talle
    }

    /// 单价（没有产品对象时按 0 处理）
    pub fn unit_price(&self) -> f64 {
        self.producto.as_ref().map(|p| p.precio).unwrap_or(0.0)
    }

    /// 行小计：服务端 `subtotal` 优先，缺失时 cantidad × precio
    pub fn line_total(&self) -> f64 {
        self.subtotal
            .unwrap_or_else(|| f64::from(self.cantidad) * self.unit_price())
    }
}

/// 购物车快照，完全由服务端拥有，每次变更整体替换。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: Option<u32>,
    #[serde(default, with = "num::opt", alias = "total_price")]
    pub total_precio: Option<f64>,
}

impl Cart {
    /// 条目总数（镜像服务端字段，缺失按 0）
    pub fn item_count(&self) -> u32 {
        self.total_items.unwrap_or(0)
    }

    /// 总金额。服务端 `total_precio` 是权威值；
    /// 只有在它缺失时才在这里（且仅在这里）做客户端求和。
    pub fn total_amount(&self) -> f64 {
        self.total_precio
            .unwrap_or_else(|| self.items.iter().map(CartItem::line_total).sum())
    }

    /// 按 `(slug, talle)` 查找条目
    pub fn find_item(&self, slug: &str, talle: Option<&str>) -> Option<&CartItem> {
        self.items.iter().find(|it| it.matches(slug, talle))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =========================================================
// 订单 (Order Domain)
// =========================================================

/// 订单状态（后端 `Pedido.estado`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Shipped => "shipped",
        }
    }

    /// 展示用标签（服务端没给 `estado_label` 时的退路）
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Paid => "Pagado",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Shipped => "Enviado",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }

    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Cancelled,
        OrderStatus::Shipped,
    ];
}

/// 订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub nombre_producto: String,
    #[serde(default)]
    pub talle: Option<String>,
    #[serde(default = "default_one", alias = "quantity")]
    pub cantidad: u32,
    #[serde(default, with = "num::opt")]
    pub precio_unitario: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub subtotal: Option<f64>,
}

/// `/orders/` 列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub estado: OrderStatus,
    #[serde(default)]
    pub estado_label: Option<String>,
    #[serde(default)]
    pub es_pagado: bool,
    #[serde(default, with = "num::opt")]
    pub total_final: Option<f64>,
    #[serde(default)]
    pub creado: String,
    #[serde(default)]
    pub mp_status: Option<String>,
}

impl OrderSummary {
    pub fn status_label(&self) -> &str {
        self.estado_label.as_deref().unwrap_or(self.estado.label())
    }
}

/// `/orders/:id/` 详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    #[serde(default)]
    pub estado: OrderStatus,
    #[serde(default)]
    pub estado_label: Option<String>,
    #[serde(default)]
    pub es_pagado: bool,
    #[serde(default, with = "num::opt")]
    pub total_productos: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub costo_envio: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub total_final: Option<f64>,
    #[serde(default)]
    pub creado: String,
    #[serde(default)]
    pub mp_status: Option<String>,
    #[serde(default)]
    pub mp_payment_id: Option<String>,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub provincia: String,
    #[serde(default)]
    pub codigo_postal: String,
    #[serde(default)]
    pub observaciones: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderDetail {
    pub fn status_label(&self) -> &str {
        self.estado_label.as_deref().unwrap_or(self.estado.label())
    }
}

// =========================================================
// 地址 (Shipping Address)
// =========================================================

/// `/me/address/` 的读写形态（Cliente 档案的子集）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub ciudad: String,
    #[serde(default)]
    pub provincia: String,
    #[serde(default)]
    pub codigo_postal: String,
    #[serde(default)]
    pub telefono: String,
}

impl Address {
    /// 是否有可用的配送数据
    pub fn is_usable(&self) -> bool {
        !self.direccion.trim().is_empty() && !self.ciudad.trim().is_empty()
    }
}

// =========================================================
// Checkout (Mercado Pago)
// =========================================================

/// `POST /checkout/create-order/` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
    #[serde(default)]
    pub estado: Option<OrderStatus>,
    #[serde(default, with = "num::opt")]
    pub total_productos: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub costo_envio: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub total_final: Option<f64>,
}

/// `POST /checkout/confirm-shipping/` 的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingConfirmation {
    pub id: i64,
    #[serde(default, with = "num::opt")]
    pub total_productos: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub costo_envio: Option<f64>,
    #[serde(default, with = "num::opt")]
    pub total_final: Option<f64>,
}

/// MP 支付偏好。只关心跳转链接 `init_point`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MpPreference {
    #[serde(default)]
    pub init_point: Option<String>,
    #[serde(default)]
    pub preference_id: Option<String>,
}

/// `GET /checkout/mp/feedback/` 的响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MpFeedback {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub pedido_id: Option<i64>,
    #[serde(default)]
    pub estado: Option<OrderStatus>,
    #[serde(default)]
    pub payment_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

// =========================================================
// 错误响应 (Error Body)
// =========================================================

/// 后端错误体：`{"detail": "..."}`，MP 相关端点可能
/// 额外带 `mp_error.message`。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub mp_error: Option<MpErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MpErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// 提取最具体的人类可读信息
    pub fn message(&self) -> Option<&str> {
        self.mp_error
            .as_ref()
            .and_then(|e| e.message.as_deref())
            .or(self.detail.as_deref())
    }
}

/// 通用 `{"detail": "..."}` 成功响应（contact / newsletter）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

// =========================================================
// 展示 (Display Helpers)
// =========================================================

/// 金额展示：阿根廷习惯，千位点号，分位只在非零时显示
///
/// `45000.0` → `"$45.000"`，`1234.5` → `"$1.234,50"`。
pub fn format_precio(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let entero = (cents / 100).to_string();
    let frac = cents % 100;

    let mut out = String::with_capacity(entero.len() + 6);
    if amount < 0.0 {
        out.push('-');
    }
    out.push('$');
    for (i, ch) in entero.chars().enumerate() {
        if i > 0 && (entero.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    if frac != 0 {
        out.push_str(&format!(",{frac:02}"));
    }
    out
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(is_staff: bool, is_superuser: bool) -> User {
        serde_json::from_value(json!({
            "id": 1,
            "username": "a@b.com",
            "email": "a@b.com",
            "first_name": "Ana",
            "is_staff": is_staff,
            "is_superuser": is_superuser,
        }))
        .unwrap()
    }

    #[test]
    fn is_admin_iff_staff_or_superuser() {
        assert!(!user(false, false).is_admin());
        assert!(user(true, false).is_admin());
        assert!(user(false, true).is_admin());
        assert!(user(true, true).is_admin());
    }

    #[test]
    fn user_without_flags_is_not_admin() {
        let u: User = serde_json::from_value(json!({
            "id": 2,
            "username": "x",
        }))
        .unwrap();
        assert!(!u.is_admin());
        assert_eq!(u.display_name(), "x");
    }

    #[test]
    fn product_price_accepts_decimal_string() {
        let p: Product = serde_json::from_value(json!({
            "nombre": "Hoodie Black",
            "slug": "hoodie-black",
            "precio": "45000.00",
        }))
        .unwrap();
        assert_eq!(p.precio, 45000.0);
        assert!(p.activo);
    }

    #[test]
    fn gallery_prefers_images_over_legacy_fields() {
        let p: Product = serde_json::from_value(json!({
            "nombre": "Hoodie",
            "slug": "hoodie",
            "precio": 1,
            "images": ["/media/a.jpg", "https://cdn.example.com/b.jpg"],
            "imagen": "/media/ignored.jpg",
        }))
        .unwrap();
        let urls = p.gallery("http://127.0.0.1:8000");
        assert_eq!(
            urls,
            vec![
                "http://127.0.0.1:8000/media/a.jpg".to_string(),
                "https://cdn.example.com/b.jpg".to_string(),
            ]
        );
    }

    #[test]
    fn gallery_falls_back_to_file_fields() {
        let p: Product = serde_json::from_value(json!({
            "nombre": "Hoodie",
            "slug": "hoodie",
            "precio": 1,
            "imagen": "/media/front.jpg",
            "imagen_hover": "/media/back.jpg",
        }))
        .unwrap();
        let urls = p.gallery("http://127.0.0.1:8000/");
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "http://127.0.0.1:8000/media/front.jpg");
        assert_eq!(p.hover_image("http://127.0.0.1:8000/").unwrap(), urls[1]);
    }

    #[test]
    fn cart_item_accepts_all_product_key_spellings() {
        for key in ["producto", "product", "product_data"] {
            let item: CartItem = serde_json::from_value(json!({
                "id": 1,
                key: { "nombre": "Hoodie", "slug": "hoodie-black", "precio": "45000.00" },
                "cantidad": 2,
                "talle": "M",
            }))
            .unwrap();
            assert_eq!(item.product_slug(), Some("hoodie-black"));
            assert!(item.matches("hoodie-black", Some("M")));
            assert!(!item.matches("hoodie-black", None));
        }
    }

    #[test]
    fn cart_totals_mirror_server_when_present() {
        let cart: Cart = serde_json::from_value(json!({
            "id": 7,
            "items": [{
                "id": 1,
                "producto": { "nombre": "Hoodie", "slug": "hoodie-black", "precio": "15000.00" },
                "cantidad": 3,
                "subtotal": "45000.00",
            }],
            "total_items": 3,
            "total_precio": "45000.00",
        }))
        .unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_amount(), 45000.0);
    }

    #[test]
    fn cart_total_falls_back_to_item_sum_only_when_missing() {
        let cart: Cart = serde_json::from_value(json!({
            "items": [
                {
                    "producto": { "nombre": "A", "slug": "a", "precio": 100.0 },
                    "cantidad": 2,
                },
                {
                    "producto": { "nombre": "B", "slug": "b", "precio": 50.0 },
                    "cantidad": 1,
                    "subtotal": 50.0,
                },
            ],
        }))
        .unwrap();
        assert_eq!(cart.total_amount(), 250.0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn order_status_round_trip_and_labels() {
        let s: OrderStatus = serde_json::from_value(json!("paid")).unwrap();
        assert!(s.is_paid());
        assert_eq!(s.label(), "Pagado");
        assert_eq!(
            serde_json::to_value(OrderStatus::Shipped).unwrap(),
            json!("shipped")
        );
    }

    #[test]
    fn order_summary_prefers_server_label() {
        let o: OrderSummary = serde_json::from_value(json!({
            "id": 12,
            "estado": "pending",
            "estado_label": "Pendiente de pago",
            "total_final": "1200.50",
            "creado": "2025-03-01T12:00:00Z",
        }))
        .unwrap();
        assert_eq!(o.status_label(), "Pendiente de pago");
        assert_eq!(o.total_final, Some(1200.5));
    }

    #[test]
    fn precio_formatting_uses_dot_separators() {
        assert_eq!(format_precio(45000.0), "$45.000");
        assert_eq!(format_precio(1234.5), "$1.234,50");
        assert_eq!(format_precio(0.0), "$0");
        assert_eq!(format_precio(999.0), "$999");
    }

    #[test]
    fn error_body_prefers_mp_message() {
        let e: ErrorBody = serde_json::from_value(json!({
            "detail": "No se pudo iniciar el pago.",
            "mp_error": { "message": "invalid access token" },
        }))
        .unwrap();
        assert_eq!(e.message(), Some("invalid access token"));

        let e: ErrorBody =
            serde_json::from_value(json!({ "detail": "El carrito está vacío." })).unwrap();
        assert_eq!(e.message(), Some("El carrito está vacío."));
    }
}
