// =========================================================
// 测试工具: MockBackend
// =========================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;

use scuffers_shared::protocol::{ConfirmShippingRequest, RegisterRequest};
use scuffers_shared::{
    Cart, CreatedOrder, MpPreference, RegisterResponse, ShippingConfirmation, TokenPair, User,
};

use super::{ApiError, ShopBackend};

/// 按操作名配置响应的 Mock 后端
///
/// 响应以 JSON 形式配置并按目标类型反序列化，
/// 同时记录每次调用（含关键参数）供断言。
pub struct MockBackend {
    // 操作名 -> 预置响应
    responses: RefCell<HashMap<String, Result<serde_json::Value, ApiError>>>,
    // 记录发出的调用 (操作名 + 关键参数)
    pub calls: RefCell<Vec<String>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn mock_ok(&self, op: &str, body: serde_json::Value) {
        self.responses.borrow_mut().insert(op.to_string(), Ok(body));
    }

    pub fn mock_err(&self, op: &str, err: ApiError) {
        self.responses
            .borrow_mut()
            .insert(op.to_string(), Err(err));
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn dispatch<T: DeserializeOwned>(&self, op: &str, call: String) -> Result<T, ApiError> {
        self.calls.borrow_mut().push(call);

        match self.responses.borrow().get(op) {
            Some(Ok(body)) => serde_json::from_value(body.clone())
                .map_err(|e| ApiError::Decode(e.to_string())),
            Some(Err(err)) => Err(err.clone()),
            None => Err(ApiError::Http {
                status: 404,
                detail: None,
            }),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl ShopBackend for MockBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<TokenPair, ApiError> {
        self.dispatch("login", format!("login {email}"))
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.dispatch("register", format!("register {}", request.email))
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.dispatch("me", "me".to_string())
    }

    async fn my_cart(&self) -> Result<Cart, ApiError> {
        self.dispatch("my_cart", "my_cart".to_string())
    }

    async fn cart_add(
        &self,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) -> Result<Cart, ApiError> {
        self.dispatch(
            "cart_add",
            format!("cart_add {slug} x{quantity} {}", talle.unwrap_or("-")),
        )
    }

    async fn cart_remove(
        &self,
        slug: &str,
        quantity: u32,
        talle: Option<&str>,
    ) -> Result<Cart, ApiError> {
        self.dispatch(
            "cart_remove",
            format!("cart_remove {slug} x{quantity} {}", talle.unwrap_or("-")),
        )
    }

    async fn create_order(&self) -> Result<CreatedOrder, ApiError> {
        self.dispatch("create_order", "create_order".to_string())
    }

    async fn confirm_shipping(
        &self,
        request: ConfirmShippingRequest,
    ) -> Result<ShippingConfirmation, ApiError> {
        self.dispatch(
            "confirm_shipping",
            format!("confirm_shipping order={}", request.order_id),
        )
    }

    async fn mp_preference(&self, order_id: i64) -> Result<MpPreference, ApiError> {
        self.dispatch("mp_preference", format!("mp_preference order={order_id}"))
    }
}
